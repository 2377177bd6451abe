//! Planner configuration.
//!
//! Every option has a default; a config file only needs the keys it wants
//! to change. Values are checked once by [`RedactionConfig::validate`],
//! which the planner calls before any document is processed.

use crate::domain::Category;
use crate::error::{RedactorError, RedactorResult};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base confidence assigned by each detector before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfidence {
    pub email: f64,
    pub ssn: f64,
    pub credit_card: f64,
    pub phone: f64,
    pub date_of_birth: f64,
    pub account_number: f64,
    /// Confidence of a card number that passes the Luhn check.
    pub validated_card: f64,
}

impl Default for BaseConfidence {
    fn default() -> Self {
        Self {
            email: 0.9,
            ssn: 0.85,
            credit_card: 0.6,
            phone: 0.75,
            date_of_birth: 0.7,
            account_number: 0.5,
            validated_card: 0.95,
        }
    }
}

impl BaseConfidence {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("base_confidence.email", self.email),
            ("base_confidence.ssn", self.ssn),
            ("base_confidence.credit_card", self.credit_card),
            ("base_confidence.phone", self.phone),
            ("base_confidence.date_of_birth", self.date_of_birth),
            ("base_confidence.account_number", self.account_number),
            ("base_confidence.validated_card", self.validated_card),
        ]
    }
}

/// A user-defined pattern reported under [`Category::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub name: String,
    pub pattern: String,
    /// Match `pattern` as exact text instead of a regex.
    #[serde(default)]
    pub literal: bool,
    #[serde(default = "default_custom_confidence")]
    pub confidence: f64,
}

fn default_custom_confidence() -> f64 {
    0.5
}

/// Options recognized by the redaction planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Candidates below this confidence are dropped after validation.
    pub confidence_floor: f64,
    /// Inclusive `(min, max)` year range for plausible birth dates.
    pub dob_year_range: (i32, i32),
    /// Fraction of the smaller candidate's area that must be covered for
    /// two findings to conflict. `0.0` means any positive overlap.
    pub overlap_area_threshold: f64,
    /// Largest horizontal gap, in page units, bridged when merging rects
    /// on the same line.
    pub line_merge_gap: f64,
    /// Keep the matched literal on each block.
    pub retain_source_text: bool,
    pub enabled_categories: Vec<Category>,
    pub base_confidence: BaseConfidence,
    pub custom_patterns: Vec<CustomPattern>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.5,
            dob_year_range: (1900, chrono::Utc::now().year()),
            overlap_area_threshold: 0.0,
            line_merge_gap: 12.0,
            retain_source_text: false,
            enabled_categories: Category::BUILTIN.to_vec(),
            base_confidence: BaseConfidence::default(),
            custom_patterns: Vec::new(),
        }
    }
}

fn check_unit(parameter: &str, value: f64) -> RedactorResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RedactorError::invalid_config(
            parameter,
            format!("{} is outside [0, 1]", value),
        ))
    }
}

impl RedactionConfig {
    /// Loads a config from a `.toml` file, or JSON for any other extension.
    ///
    /// The loaded config is validated before it is returned.
    pub fn from_path(path: &Path) -> RedactorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RedactorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|e| RedactorError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            serde_json::from_str(&contents).map_err(|e| RedactorError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Whether a built-in category is switched on.
    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled_categories.contains(&category)
    }

    /// Rejects out-of-range or inconsistent values.
    pub fn validate(&self) -> RedactorResult<()> {
        check_unit("confidence_floor", self.confidence_floor)?;
        check_unit("overlap_area_threshold", self.overlap_area_threshold)?;

        let (min, max) = self.dob_year_range;
        if min > max {
            return Err(RedactorError::invalid_config(
                "dob_year_range",
                format!("min year {} is after max year {}", min, max),
            ));
        }

        if !self.line_merge_gap.is_finite() || self.line_merge_gap < 0.0 {
            return Err(RedactorError::invalid_config(
                "line_merge_gap",
                format!("{} must be a finite, non-negative distance", self.line_merge_gap),
            ));
        }

        for (parameter, value) in self.base_confidence.entries() {
            check_unit(parameter, value)?;
        }

        for pattern in &self.custom_patterns {
            if pattern.name.trim().is_empty() {
                return Err(RedactorError::invalid_config(
                    "custom_patterns.name",
                    "pattern name must not be empty",
                ));
            }
            if pattern.pattern.is_empty() {
                return Err(RedactorError::invalid_config(
                    "custom_patterns.pattern",
                    format!("pattern '{}' is empty", pattern.name),
                ));
            }
            check_unit("custom_patterns.confidence", pattern.confidence)?;
        }

        Ok(())
    }
}
