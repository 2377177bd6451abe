//! Phone number domain logic.
//!
//! This module encapsulates the business rules for US phone number
//! detection.

use super::{scan_digits, Candidate, Category, PatternDetector};
use regex::Regex;

/// American phone number matcher.
///
/// Supports ten-digit numbers in these layouts, each with an optional
/// `+1` or `1` country prefix:
/// - (555) 123-4567
/// - 555-123-4567
/// - 555.123.4567
/// - 5551234567
///
/// Unlike strict NANP checks, exchange and area codes starting with 0 or 1
/// are accepted; printed documents often carry placeholder numbers.
#[derive(Debug, Clone)]
pub struct PhoneNumberDetector {
    pattern: Regex,
    confidence: f64,
}

impl PhoneNumberDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(
                r"(?:\+?1[-. ]?)?(?:\(\d{3}\) ?\d{3}-\d{4}|\d{3}-\d{3}-\d{4}|\d{3}\.\d{3}\.\d{4}|\d{10})",
            )
            .expect("Valid phone number regex"),
            confidence,
        }
    }

    /// Strips formatting and the country prefix, returning the ten digits.
    pub fn normalize(text: &str) -> Option<String> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.len() {
            10 => Some(digits),
            11 if digits.starts_with('1') => Some(digits[1..].to_string()),
            _ => None,
        }
    }
}

impl PatternDetector for PhoneNumberDetector {
    fn category(&self) -> Category {
        Category::Phone
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        scan_digits(&self.pattern, text, Category::Phone, self.confidence, |m| {
            Self::normalize(m).is_some()
        })
    }
}
