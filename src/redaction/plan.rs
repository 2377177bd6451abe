//! Planner output types.

use crate::domain::Category;
use crate::geometry::{IssueReason, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A page-positioned rectangle to paint opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionBlock {
    pub page_index: usize,
    pub rect: Rect,
    pub category: Category,
    pub confidence: f64,
    /// The matched literal; only set when `retain_source_text` is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

impl RedactionBlock {
    /// Reading order: page, then top-to-bottom (`y`), then left-to-right
    /// (`x`). Remaining fields break ties so the order is total.
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.page_index
            .cmp(&other.page_index)
            .then(self.rect.y.total_cmp(&other.rect.y))
            .then(self.rect.x.total_cmp(&other.rect.x))
            .then(self.category.cmp(&other.category))
            .then(self.rect.width.total_cmp(&other.rect.width))
            .then(self.rect.height.total_cmp(&other.rect.height))
            .then(other.confidence.total_cmp(&self.confidence))
    }
}

/// A page that was only partly processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageIssue {
    pub page_index: usize,
    pub run_index: usize,
    pub reason: IssueReason,
}

/// Ordered redaction blocks for one document, plus any partial-page flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedactionPlan {
    pub blocks: Vec<RedactionBlock>,
    pub issues: Vec<PageIssue>,
    pub pages_processed: usize,
}

impl RedactionPlan {
    /// True when at least one run was skipped.
    pub fn is_partial(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Distinct page indexes with at least one issue, ascending.
    pub fn partial_pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.issues.iter().map(|i| i.page_index).collect();
        pages.dedup();
        pages
    }

    /// Blocks to paint on one page, in reading order.
    pub fn blocks_for_page(&self, page_index: usize) -> impl Iterator<Item = &RedactionBlock> {
        self.blocks
            .iter()
            .filter(move |b| b.page_index == page_index)
    }

    pub fn has_redactions(&self) -> bool {
        !self.blocks.is_empty()
    }
}
