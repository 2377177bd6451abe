//! Date-of-birth detection and calendar validation.

use super::{scan_digits, Candidate, Category, PatternDetector, Validator, Verdict};
use regex::Regex;

/// `MM/DD/YYYY` or `MM-DD-YYYY` dates; month and day may be one digit.
///
/// The detector only checks the shape. Calendar and year-range checks live
/// in [`BirthDateValidator`].
#[derive(Debug, Clone)]
pub struct DateOfBirthDetector {
    pattern: Regex,
    confidence: f64,
}

impl DateOfBirthDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(r"\d{1,2}/\d{1,2}/\d{4}|\d{1,2}-\d{1,2}-\d{4}")
                .expect("Valid date regex"),
            confidence,
        }
    }
}

impl PatternDetector for DateOfBirthDetector {
    fn category(&self) -> Category {
        Category::DateOfBirth
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        scan_digits(&self.pattern, text, Category::DateOfBirth, self.confidence, |_| true)
    }
}

/// Proleptic Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-12) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Splits `M/D/YYYY` or `M-D-YYYY` into numeric parts.
fn parse_parts(text: &str) -> Option<(u32, u32, i32)> {
    let mut parts = text.split(['/', '-']);
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((month, day, year))
}

/// Discards impossible calendar dates and years outside the birth range.
#[derive(Debug, Clone, Copy)]
pub struct BirthDateValidator {
    min_year: i32,
    max_year: i32,
}

impl BirthDateValidator {
    pub fn new((min_year, max_year): (i32, i32)) -> Self {
        Self { min_year, max_year }
    }

    /// True when the text is a real calendar date inside the year range.
    pub fn is_plausible(&self, text: &str) -> bool {
        let Some((month, day, year)) = parse_parts(text) else {
            return false;
        };
        if year < self.min_year || year > self.max_year {
            return false;
        }
        days_in_month(year, month).is_some_and(|max_day| day >= 1 && day <= max_day)
    }
}

impl Validator for BirthDateValidator {
    fn validate(&self, candidate: &Candidate) -> Verdict {
        if self.is_plausible(&candidate.matched_text) {
            Verdict::Keep(candidate.confidence)
        } else {
            Verdict::Discard
        }
    }
}
