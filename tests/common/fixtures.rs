//! Test fixtures and page builders.
//!
//! Pages are laid out with a monospaced font: every character is
//! `CHAR_WIDTH` wide and every line `LINE_HEIGHT` tall, so expected
//! rectangles can be computed by hand.

use redact_plan::{PageText, Rect, TextRun};

pub const CHAR_WIDTH: f64 = 6.0;
pub const LINE_HEIGHT: f64 = 10.0;
pub const LINE_PITCH: f64 = 14.0;
pub const LEFT_MARGIN: f64 = 72.0;
pub const TOP_MARGIN: f64 = 72.0;

/// Builder for pages of positioned text.
///
/// # Example
///
/// ```ignore
/// let page = PageBuilder::new()
///     .line("Contact: jane.doe@example.com")
///     .line("Phone: 555-123-4567")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    runs: Vec<TextRun>,
    line: usize,
    cursor: f64,
    page_index: usize,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            cursor: LEFT_MARGIN,
            ..Default::default()
        }
    }

    pub fn on_page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    fn y(&self) -> f64 {
        TOP_MARGIN + self.line as f64 * LINE_PITCH
    }

    fn advance(&mut self, text: &str) {
        self.cursor += text.chars().count() as f64 * CHAR_WIDTH;
    }

    /// Starts a new line holding one per-character run.
    pub fn line(self, text: &str) -> Self {
        self.newline().run(text)
    }

    /// Starts a new line holding one run with a single rect.
    pub fn coarse_line(self, text: &str) -> Self {
        self.newline().coarse_run(text)
    }

    /// Appends a per-character run to the current line.
    pub fn run(mut self, text: &str) -> Self {
        let y = self.y();
        let rects = (0..text.chars().count())
            .map(|i| Rect::new(self.cursor + i as f64 * CHAR_WIDTH, y, CHAR_WIDTH, LINE_HEIGHT))
            .collect();
        self.runs.push(TextRun::new(text, rects, self.page_index));
        self.advance(text);
        self
    }

    /// Appends a run-level rect to the current line.
    pub fn coarse_run(mut self, text: &str) -> Self {
        let width = text.chars().count() as f64 * CHAR_WIDTH;
        let rect = Rect::new(self.cursor, self.y(), width, LINE_HEIGHT);
        self.runs.push(TextRun::new(text, vec![rect], self.page_index));
        self.advance(text);
        self
    }

    /// Appends a run with no geometry at all.
    pub fn malformed_run(mut self, text: &str) -> Self {
        self.runs.push(TextRun::new(text, Vec::new(), self.page_index));
        self
    }

    /// Appends an arbitrary run as-is.
    pub fn raw_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    fn newline(mut self) -> Self {
        if !self.runs.is_empty() {
            self.line += 1;
        }
        self.cursor = LEFT_MARGIN;
        self
    }

    pub fn build(self) -> PageText {
        PageText::new(self.runs)
    }
}

/// A single page with one per-character line.
pub fn single_line_page(text: &str) -> PageText {
    PageBuilder::new().line(text).build()
}

/// Expected rect for characters `[first, last]` of line `line`, starting
/// at the left margin.
pub fn char_span_rect(line: usize, first: usize, last: usize) -> Rect {
    Rect::new(
        LEFT_MARGIN + first as f64 * CHAR_WIDTH,
        TOP_MARGIN + line as f64 * LINE_PITCH,
        (last - first + 1) as f64 * CHAR_WIDTH,
        LINE_HEIGHT,
    )
}

/// Serializes pages in the CLI's input format.
pub fn document_json(pages: &[PageText]) -> String {
    serde_json::json!({ "pages": pages }).to_string()
}
