//! Payment card detection and Luhn validation.

use super::{scan_digits, Candidate, Category, PatternDetector, Validator, Verdict};
use regex::Regex;

/// Digit count range for payment card numbers.
pub const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Payment card matcher.
///
/// Matches 13-19 digits, either contiguous or grouped in fours with a
/// space or hyphen (e.g. `4532 0151 1283 0366`). A grouped match that
/// swallowed a trailing short number (`4111 1111 1111 1111 12`) is cut back
/// to its longest group boundary that checksums. Acceptance is left to
/// [`LuhnValidator`].
#[derive(Debug, Clone)]
pub struct CreditCardDetector {
    pattern: Regex,
    confidence: f64,
}

impl CreditCardDetector {
    pub fn new(confidence: f64) -> Self {
        Self {
            pattern: Regex::new(r"\d{4}(?:[ -]\d{4}){2,3}(?:[ -]\d{1,4})?|\d{13,19}")
                .expect("Valid credit card regex"),
            confidence,
        }
    }
}

impl PatternDetector for CreditCardDetector {
    fn category(&self) -> Category {
        Category::CreditCard
    }

    fn detect(&self, text: &str) -> Vec<Candidate> {
        scan_digits(
            &self.pattern,
            text,
            Category::CreditCard,
            self.confidence,
            |m| CARD_DIGITS.contains(&m.chars().filter(|c| c.is_ascii_digit()).count()),
        )
        .into_iter()
        .map(|candidate| match checksummed_prefix(&candidate.matched_text) {
            Some(len) if len < candidate.matched_text.len() => Candidate::new(
                Category::CreditCard,
                candidate.start,
                candidate.start + len,
                text,
                candidate.confidence,
            ),
            _ => candidate,
        })
        .collect()
    }
}

/// Byte length of the longest prefix of `matched` that ends on a digit
/// group and is a Luhn-valid card number.
fn checksummed_prefix(matched: &str) -> Option<usize> {
    let mut digits = String::with_capacity(matched.len());
    let mut best = None;
    let mut chars = matched.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !c.is_ascii_digit() {
            continue;
        }
        digits.push(c);
        let group_end = chars.peek().map_or(true, |&(_, next)| !next.is_ascii_digit());
        if group_end && CARD_DIGITS.contains(&digits.len()) && luhn_valid(&digits) {
            best = Some(i + c.len_utf8());
        }
    }

    best
}

/// Mod-10 checksum over a string of ASCII digits.
///
/// Returns false for empty input or any non-digit character.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 1 {
            let doubled = d * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            d
        };
    }

    sum % 10 == 0
}

/// Confirms card candidates with the Luhn checksum.
#[derive(Debug, Clone, Copy)]
pub struct LuhnValidator {
    confirmed: f64,
}

impl LuhnValidator {
    /// `confirmed` is the confidence assigned to a checksum pass.
    pub fn new(confirmed: f64) -> Self {
        Self { confirmed }
    }
}

impl Validator for LuhnValidator {
    fn validate(&self, candidate: &Candidate) -> Verdict {
        let digits = candidate.digits();
        if CARD_DIGITS.contains(&digits.len()) && luhn_valid(&digits) {
            Verdict::Keep(self.confirmed)
        } else {
            Verdict::Discard
        }
    }
}
