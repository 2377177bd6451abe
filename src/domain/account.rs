//! Account number domain logic.
//!
//! Any run of eight or more digits is treated as a possible account
//! number. This is the broadest detector and the lowest precedence; runs
//! already matched as a card, SSN or phone number are filtered out by the
//! detector table.

use super::{Candidate, Category, PatternDetector};
use regex::Regex;

/// Generic account number matcher.
#[derive(Debug, Clone)]
pub struct AccountNumberDetector {
    pattern: Regex,
    confidence: f64,
}

impl AccountNumberDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(r"\d{8,}").expect("Valid account number regex"),
            confidence,
        }
    }
}

impl PatternDetector for AccountNumberDetector {
    fn category(&self) -> Category {
        Category::AccountNumber
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        // Greedy and leftmost, so every match is already a maximal digit run.
        self.pattern
            .find_iter(text)
            .map(|m| {
                Candidate::new(
                    Category::AccountNumber,
                    m.start(),
                    m.end(),
                    text,
                    self.confidence,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_extraction() {
        let detector = AccountNumberDetector::new(0.5);
        let found = detector.detect("Account Number: 123456789-00001, ref 12345678");
        let texts: Vec<_> = found.iter().map(|c| c.matched_text.as_str()).collect();
        assert_eq!(texts, vec!["123456789", "12345678"]);
    }

    #[test]
    fn test_short_runs_ignored() {
        let detector = AccountNumberDetector::new(0.5);
        assert!(detector.detect("order 1234567 shipped").is_empty());
    }
}
