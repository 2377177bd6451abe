//! Detection summary for the persistence and reporting layer.

use super::plan::{RedactionBlock, RedactionPlan};
use crate::domain::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Min, max and mean confidence over a set of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ConfidenceStats {
    /// `None` for an empty input.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Aggregate view of a redaction plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Block count for every category, zero included.
    pub counts_by_category: BTreeMap<Category, usize>,
    /// Per-category confidence; `None` when the category has no blocks.
    pub confidence_stats: BTreeMap<Category, Option<ConfidenceStats>>,
    pub overall: Option<ConfidenceStats>,
    pub total_blocks: usize,
    pub pages_processed: usize,
    pub pages_affected: usize,
    pub partial_pages: Vec<usize>,
}

/// Folds redaction blocks into a [`DetectionReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    /// Summarizes a block list. Page-level fields that need the plan
    /// (`pages_processed`, `partial_pages`) are left at zero/empty.
    pub fn aggregate(blocks: &[RedactionBlock]) -> DetectionReport {
        let mut counts_by_category = BTreeMap::new();
        let mut confidence_stats = BTreeMap::new();

        for category in Category::ALL {
            let confidences = blocks
                .iter()
                .filter(|b| b.category == category)
                .map(|b| b.confidence);
            let stats = ConfidenceStats::from_values(confidences);
            let count = blocks.iter().filter(|b| b.category == category).count();
            counts_by_category.insert(category, count);
            confidence_stats.insert(category, stats);
        }

        let pages: BTreeSet<usize> = blocks.iter().map(|b| b.page_index).collect();

        DetectionReport {
            counts_by_category,
            confidence_stats,
            overall: ConfidenceStats::from_values(blocks.iter().map(|b| b.confidence)),
            total_blocks: blocks.len(),
            pages_processed: 0,
            pages_affected: pages.len(),
            partial_pages: Vec::new(),
        }
    }

    /// Summarizes a whole plan, including page counts and partial pages.
    pub fn summarize(plan: &RedactionPlan) -> DetectionReport {
        DetectionReport {
            pages_processed: plan.pages_processed,
            partial_pages: plan.partial_pages(),
            ..Self::aggregate(&plan.blocks)
        }
    }
}
