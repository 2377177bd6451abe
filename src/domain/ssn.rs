//! Social Security Number detection.

use super::{scan_digits, Candidate, Category, PatternDetector};
use regex::Regex;

/// US Social Security Number matcher.
///
/// Accepts nine digits, either bare or grouped 3-2-4:
/// - 123-45-6789
/// - 123 45 6789
/// - 123456789
#[derive(Debug, Clone)]
pub struct SsnDetector {
    pattern: Regex,
    confidence: f64,
}

impl SsnDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(r"\d{3}-\d{2}-\d{4}|\d{3} \d{2} \d{4}|\d{9}")
                .expect("Valid SSN regex"),
            confidence,
        }
    }

    /// Area, group and serial must each contain a non-zero digit.
    pub fn groups_valid(digits: &str) -> bool {
        digits.len() == 9
            && &digits[0..3] != "000"
            && &digits[3..5] != "00"
            && &digits[5..9] != "0000"
    }
}

impl PatternDetector for SsnDetector {
    fn category(&self) -> Category {
        Category::Ssn
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        scan_digits(&self.pattern, text, Category::Ssn, self.confidence, |m| {
            let digits: String = m.chars().filter(|c| c.is_ascii_digit()).collect();
            Self::groups_valid(&digits)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &str) -> Vec<String> {
        SsnDetector::new(0.85)
            .detect(text)
            .into_iter()
            .map(|c| c.matched_text)
            .collect()
    }

    #[test]
    fn test_ssn_formats() {
        assert_eq!(matches("SSN: 123-45-6789"), vec!["123-45-6789"]);
        assert_eq!(matches("SSN: 123 45 6789"), vec!["123 45 6789"]);
        assert_eq!(matches("SSN: 123456789."), vec!["123456789"]);
    }

    #[test]
    fn test_zero_groups_rejected() {
        assert!(matches("000-12-3456").is_empty());
        assert!(matches("123-00-4567").is_empty());
        assert!(matches("123-45-0000").is_empty());
    }

    #[test]
    fn test_longer_digit_runs_ignored() {
        assert!(matches("1234567890").is_empty());
        assert!(matches("9123-45-6789").is_empty());
    }

    #[test]
    fn test_mixed_separators_ignored() {
        assert!(matches("123-45 6789").is_empty());
    }

    #[test]
    fn test_confidence_is_base() {
        let found = SsnDetector::new(0.85).detect("123-45-6789");
        assert_eq!(found[0].confidence, 0.85);
        assert_eq!((found[0].start, found[0].end), (0, 11));
    }
}
