//! Redaction planning.
//!
//! [`RedactionPlanner`] drives detection, validation, geometry mapping and
//! overlap resolution for every page of a document and returns the ordered
//! blocks the PDF engine should paint.

pub mod overlap;
pub mod plan;
pub mod report;

pub use overlap::{MappedCandidate, OverlapResolver};
pub use plan::{PageIssue, RedactionBlock, RedactionPlan};
pub use report::{ConfidenceStats, DetectionReport, ReportAggregator};

use crate::config::RedactionConfig;
use crate::domain::{Candidate, DetectorTable};
use crate::error::RedactorResult;
use crate::geometry::{PageText, PageTextModel, SpanToGeometryMapper};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Blocks and issues produced for a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutcome {
    pub page_index: usize,
    pub blocks: Vec<RedactionBlock>,
    pub issues: Vec<PageIssue>,
}

/// Pure, synchronous pipeline from positioned text to redaction blocks.
///
/// Construction validates the configuration and compiles every detector;
/// after that the planner is immutable and may be shared across threads.
pub struct RedactionPlanner {
    config: RedactionConfig,
    table: DetectorTable,
    mapper: SpanToGeometryMapper,
    resolver: OverlapResolver,
}

impl RedactionPlanner {
    /// Creates a planner, failing fast on an invalid configuration.
    pub fn new(config: RedactionConfig) -> RedactorResult<Self> {
        config.validate()?;
        let table = DetectorTable::from_config(&config)?;
        debug!(categories = ?table.categories(), "redaction planner ready");

        Ok(Self {
            mapper: SpanToGeometryMapper::new(config.line_merge_gap),
            resolver: OverlapResolver::new(config.overlap_area_threshold),
            table,
            config,
        })
    }

    /// Creates a planner with the default configuration.
    pub fn with_defaults() -> RedactorResult<Self> {
        Self::new(RedactionConfig::default())
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    /// Plans a whole document. Pages run in parallel; the result is merged
    /// in page order and is identical to a sequential run.
    pub fn plan(&self, pages: &[PageText]) -> RedactionPlan {
        let outcomes: Vec<PageOutcome> = pages
            .par_iter()
            .enumerate()
            .map(|(page_index, page)| self.plan_page(page_index, page))
            .collect();

        let mut plan = RedactionPlan {
            pages_processed: pages.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            plan.blocks.extend(outcome.blocks);
            plan.issues.extend(outcome.issues);
        }

        info!(
            pages = plan.pages_processed,
            blocks = plan.blocks.len(),
            partial_pages = plan.partial_pages().len(),
            "redaction plan complete"
        );
        plan
    }

    /// Plans a document and summarizes it.
    pub fn plan_with_report(&self, pages: &[PageText]) -> (RedactionPlan, DetectionReport) {
        let plan = self.plan(pages);
        let report = ReportAggregator::summarize(&plan);
        (plan, report)
    }

    /// Runs the full pipeline for one page.
    ///
    /// Runs with malformed geometry are skipped and reported as issues; the
    /// rest of the page is still processed.
    pub fn plan_page(&self, page_index: usize, page: &PageText) -> PageOutcome {
        let model = PageTextModel::build(page);

        let issues: Vec<PageIssue> = model
            .issues()
            .iter()
            .map(|&(run_index, reason)| {
                warn!(page = page_index, run = run_index, %reason, "skipping run");
                PageIssue {
                    page_index,
                    run_index,
                    reason,
                }
            })
            .collect();

        let candidates: Vec<Candidate> = model
            .scan_ranges()
            .iter()
            .flat_map(|range| self.table.detect_range(model.text(), range.clone()))
            .collect();
        let found = candidates.len();

        let mapped: Vec<MappedCandidate> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let rects = self.mapper.map(&model, candidate.start, candidate.end);
                if rects.is_empty() {
                    debug!(
                        page = page_index,
                        category = %candidate.category,
                        start = candidate.start,
                        "finding has no geometry"
                    );
                    return None;
                }
                Some(MappedCandidate { candidate, rects })
            })
            .collect();

        let resolved = self.resolver.resolve(mapped);

        let mut blocks: Vec<RedactionBlock> = resolved
            .iter()
            .flat_map(|finding| {
                finding.rects.iter().map(move |rect| RedactionBlock {
                    page_index,
                    rect: *rect,
                    category: finding.candidate.category,
                    confidence: finding.candidate.confidence,
                    source_text: self
                        .config
                        .retain_source_text
                        .then(|| finding.candidate.matched_text.clone()),
                })
            })
            .collect();
        blocks.sort_by(RedactionBlock::reading_order);

        debug!(
            page = page_index,
            candidates = found,
            findings = resolved.len(),
            blocks = blocks.len(),
            "page planned"
        );

        PageOutcome {
            page_index,
            blocks,
            issues,
        }
    }

    /// Detection and validation over plain text, without geometry.
    pub fn detect_text(&self, text: &str) -> Vec<Candidate> {
        self.table.detect(text)
    }
}
