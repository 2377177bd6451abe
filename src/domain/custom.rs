//! User-configured patterns.

use super::{Candidate, Category, PatternDetector};
use crate::config::CustomPattern;
use crate::error::{RedactorError, RedactorResult};
use regex::Regex;

struct CompiledPattern {
    name: String,
    regex: Regex,
    confidence: f64,
}

/// Matches every configured literal or regex pattern.
///
/// Literal patterns are escaped before compilation, so `a.b` only matches
/// the exact text `a.b`.
pub struct CustomPatternDetector {
    patterns: Vec<CompiledPattern>,
}

impl CustomPatternDetector {
    pub fn new(patterns: &[CustomPattern]) -> RedactorResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let source = if p.literal {
                    regex::escape(&p.pattern)
                } else {
                    p.pattern.clone()
                };
                let regex = Regex::new(&source).map_err(|e| RedactorError::PatternError {
                    pattern: p.pattern.clone(),
                    reason: e.to_string(),
                })?;
                Ok(CompiledPattern {
                    name: p.name.clone(),
                    regex,
                    confidence: p.confidence,
                })
            })
            .collect::<RedactorResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Names of the compiled patterns, in configuration order.
    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }
}

impl PatternDetector for CustomPatternDetector {
    fn category(&self) -> Category {
        Category::Custom
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        self.patterns
            .iter()
            .flat_map(|p| {
                p.regex
                    .find_iter(text)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| Candidate::new(Category::Custom, m.start(), m.end(), text, p.confidence))
            })
            .collect()
    }
}
