//! Email address detection.

use super::{Candidate, Category, PatternDetector};
use regex::Regex;

/// Email address matcher.
///
/// Local part allows letters, digits and `. _ % + -`; the domain needs at
/// least one dot and ends in an alphabetic TLD of two or more letters.
#[derive(Debug, Clone)]
pub struct EmailDetector {
    pattern: Regex,
    confidence: f64,
}

impl EmailDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(
                r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}",
            )
            .expect("Valid email regex"),
            confidence,
        }
    }
}

impl PatternDetector for EmailDetector {
    fn category(&self) -> Category {
        Category::Email
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        self.pattern
            .find_iter(text)
            .map(|m| Candidate::new(Category::Email, m.start(), m.end(), text, self.confidence))
            .collect()
    }
}
