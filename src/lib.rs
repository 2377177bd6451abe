//! Detection-to-geometry planning for PDF redaction.
//!
//! Given the positioned text of each page (as extracted by an external PDF
//! engine), this library finds personal data, scores it, and converts every
//! finding into page rectangles that a renderer can paint opaque.
//!
//! # Features
//!
//! - **Categories**: emails, SSNs, credit cards (Luhn checked), US phone
//!   numbers, dates of birth (calendar checked), account numbers, and
//!   user-defined patterns
//! - **Geometry**: per-character or per-run rects, with spans crossing runs
//!   and wrapping across lines
//! - **Overlap resolution**: fixed category precedence, deterministic ties
//! - **Partial results**: malformed runs are flagged, never fatal
//!
//! # Architecture
//!
//! - [`domain`]: Detectors and validators, one pair per category
//! - [`geometry`]: Page text model and span-to-rect mapping
//! - [`redaction`]: Overlap resolution, planning, and reporting
//! - [`config`]: Planner options
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```
//! use redact_plan::{PageText, Rect, RedactionPlanner, TextRun};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "Card: 4532015112830366";
//! let rects = (0..text.len())
//!     .map(|i| Rect::new(72.0 + i as f64 * 6.0, 700.0, 6.0, 10.0))
//!     .collect();
//! let page = PageText::new(vec![TextRun::new(text, rects, 0)]);
//!
//! let planner = RedactionPlanner::with_defaults()?;
//! let (plan, report) = planner.plan_with_report(&[page]);
//!
//! assert_eq!(plan.blocks.len(), 1);
//! assert_eq!(report.total_blocks, 1);
//! # Ok(())
//! # }
//! ```

// Public API
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod redaction;

// Re-exports for convenient access
pub use config::{BaseConfidence, CustomPattern, RedactionConfig};
pub use domain::{Candidate, Category, PatternDetector, Validator, Verdict};
pub use error::{RedactorError, RedactorResult};
pub use geometry::{IssueReason, PageText, Rect, TextRun};
pub use redaction::{
    DetectionReport, PageIssue, RedactionBlock, RedactionPlan, RedactionPlanner,
    ReportAggregator,
};
