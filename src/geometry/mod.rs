//! Page text and geometry.
//!
//! The external PDF engine supplies each page as ordered [`TextRun`]s. The
//! planner concatenates their text into one string per page
//! ([`PageTextModel`]) and keeps an index from byte ranges back to runs so
//! that matches can be mapped onto rectangles again.

pub mod mapper;

pub use mapper::SpanToGeometryMapper;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Axis-aligned rectangle in page space.
///
/// The origin and axis direction belong to the PDF engine; only `x`, `y`,
/// `width` and `height` relationships are used here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Finite coordinates and strictly positive size.
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Area shared by both rects; zero when they only touch.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }

    /// Same visual line: the vertical extents overlap by at least half of
    /// the shorter rect's height.
    pub fn same_line(&self, other: &Rect) -> bool {
        let overlap = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap >= 0.5 * self.height.min(other.height)
    }

    /// Horizontal distance between the rects; zero or negative when they
    /// overlap horizontally.
    pub fn horizontal_gap(&self, other: &Rect) -> f64 {
        (other.x - self.right()).max(self.x - other.right())
    }
}

/// A run of text with its geometry, as extracted by the PDF engine.
///
/// `rects` holds either one rect per `char` of `text` or a single rect for
/// the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub rects: Vec<Rect>,
    #[serde(default)]
    pub page_index: usize,
}

impl TextRun {
    pub fn new(text: impl Into<String>, rects: Vec<Rect>, page_index: usize) -> Self {
        Self {
            text: text.into(),
            rects,
            page_index,
        }
    }

    /// Classifies the run's geometry, or explains why it is unusable.
    pub fn granularity(&self) -> Result<Granularity, IssueReason> {
        if self.rects.is_empty() {
            return Err(IssueReason::MissingGeometry);
        }
        if !self.rects.iter().all(Rect::is_well_formed) {
            return Err(IssueReason::NonPositiveRect);
        }

        let chars = self.text.chars().count();
        if self.rects.len() == chars {
            Ok(Granularity::PerChar)
        } else if self.rects.len() == 1 {
            Ok(Granularity::Run)
        } else {
            Err(IssueReason::RectCountMismatch {
                chars,
                rects: self.rects.len(),
            })
        }
    }
}

/// One page of runs in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    pub runs: Vec<TextRun>,
}

impl PageText {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }
}

/// How finely a run's geometry is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One rect per character.
    PerChar,
    /// One rect for the whole run.
    Run,
}

/// Why a run was excluded from detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueReason {
    /// Non-empty text with no rects.
    MissingGeometry,
    /// A rect with non-positive width or height, or non-finite coordinates.
    NonPositiveRect,
    /// More than one rect, but not one per character.
    RectCountMismatch { chars: usize, rects: usize },
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "run has text but no geometry"),
            Self::NonPositiveRect => write!(f, "run has a rect with non-positive size"),
            Self::RectCountMismatch { chars, rects } => {
                write!(f, "run has {} rects for {} characters", rects, chars)
            }
        }
    }
}

/// Byte range of one usable run inside the page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSegment {
    pub run_index: usize,
    pub start: usize,
    pub end: usize,
    pub granularity: Granularity,
}

/// Concatenated text of one page plus the offset index back into its runs.
///
/// Usable runs are joined with no separator, so a match may cross runs.
/// A run with malformed geometry contributes a single `'\n'` instead of its
/// text; no detector matches across a newline, and the newline maps to no
/// geometry.
///
/// Where one line ends in a digit and the next line starts with one, the
/// text is split into separate [`scan_ranges`](Self::scan_ranges) so the two
/// numbers are never read as one.
#[derive(Debug)]
pub struct PageTextModel<'a> {
    page: &'a PageText,
    text: String,
    segments: Vec<RunSegment>,
    scan_ranges: Vec<Range<usize>>,
    issues: Vec<(usize, IssueReason)>,
}

impl<'a> PageTextModel<'a> {
    pub fn build(page: &'a PageText) -> Self {
        let mut text = String::new();
        let mut segments = Vec::with_capacity(page.runs.len());
        let mut issues = Vec::new();

        for (run_index, run) in page.runs.iter().enumerate() {
            if run.text.is_empty() {
                continue;
            }
            match run.granularity() {
                Ok(granularity) => {
                    let start = text.len();
                    text.push_str(&run.text);
                    segments.push(RunSegment {
                        run_index,
                        start,
                        end: text.len(),
                        granularity,
                    });
                }
                Err(reason) => {
                    text.push('\n');
                    issues.push((run_index, reason));
                }
            }
        }

        let scan_ranges = Self::split_fused_digits(page, &text, &segments);

        Self {
            page,
            text,
            segments,
            scan_ranges,
            issues,
        }
    }

    /// Cuts the text between adjacent runs on different lines whose join
    /// would glue two digits together.
    fn split_fused_digits(
        page: &PageText,
        text: &str,
        segments: &[RunSegment],
    ) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;

        for pair in segments.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.end != next.start {
                continue;
            }
            let line_break = match (
                page.runs[prev.run_index].rects.last(),
                page.runs[next.run_index].rects.first(),
            ) {
                (Some(a), Some(b)) => !a.same_line(b),
                _ => false,
            };
            let fused = text[..next.start].ends_with(|c: char| c.is_ascii_digit())
                && text[next.start..].starts_with(|c: char| c.is_ascii_digit());
            if line_break && fused {
                ranges.push(start..next.start);
                start = next.start;
            }
        }

        ranges.push(start..text.len());
        ranges
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Disjoint, ascending byte ranges of [`text`](Self::text) that
    /// detection runs over independently. Together they cover the text.
    pub fn scan_ranges(&self) -> &[Range<usize>] {
        &self.scan_ranges
    }

    pub fn segments(&self) -> &[RunSegment] {
        &self.segments
    }

    pub fn run(&self, run_index: usize) -> &'a TextRun {
        &self.page.runs[run_index]
    }

    /// Runs skipped for malformed geometry, as `(run_index, reason)`.
    pub fn issues(&self) -> &[(usize, IssueReason)] {
        &self.issues
    }
}
