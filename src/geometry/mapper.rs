//! Maps character spans of the page text back onto page rectangles.

use super::{Granularity, PageTextModel, Rect};

/// Converts a byte span of [`PageTextModel::text`] into rectangles.
///
/// Per-character runs contribute the rect of every character the span
/// touches, rounding outward when a boundary falls inside a character.
/// Run-level geometry contributes the whole run rect on any overlap, which
/// over-redacts rather than guessing at sub-run positions.
#[derive(Debug, Clone, Copy)]
pub struct SpanToGeometryMapper {
    line_merge_gap: f64,
}

impl SpanToGeometryMapper {
    pub fn new(line_merge_gap: f64) -> Self {
        Self { line_merge_gap }
    }

    /// Rects covering `[start, end)`, in run order, merged per line.
    pub fn map(&self, model: &PageTextModel<'_>, start: usize, end: usize) -> Vec<Rect> {
        let mut rects = Vec::new();
        if start >= end {
            return rects;
        }

        for segment in model.segments() {
            if segment.end <= start {
                continue;
            }
            if segment.start >= end {
                break;
            }

            let run = model.run(segment.run_index);
            match segment.granularity {
                Granularity::Run => rects.push(run.rects[0]),
                Granularity::PerChar => {
                    let local_start = start.saturating_sub(segment.start);
                    let local_end = end.min(segment.end) - segment.start;
                    for (char_index, (byte, ch)) in run.text.char_indices().enumerate() {
                        if byte >= local_end {
                            break;
                        }
                        if byte + ch.len_utf8() > local_start {
                            rects.push(run.rects[char_index]);
                        }
                    }
                }
            }
        }

        self.merge(rects)
    }

    /// Merges consecutive rects on the same line whose horizontal gap is
    /// within the tolerance. Rects on different lines are never merged.
    pub fn merge(&self, rects: Vec<Rect>) -> Vec<Rect> {
        let mut merged: Vec<Rect> = Vec::with_capacity(rects.len());

        for rect in rects {
            match merged.last_mut() {
                Some(last)
                    if last.same_line(&rect)
                        && last.horizontal_gap(&rect) <= self.line_merge_gap =>
                {
                    *last = last.union(&rect);
                }
                _ => merged.push(rect),
            }
        }

        merged
    }
}
