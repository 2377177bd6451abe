//! Domain models and business logic for pattern matching.
//!
//! Each [`Category`] owns one detector (syntax) and one validator (semantic
//! confirmation). The [`DetectorTable`] registers them in a fixed order so
//! that detection output never depends on registration or hash order.

pub mod account;
pub mod card;
pub mod custom;
pub mod dob;
pub mod email;
pub mod phone;
pub mod ssn;

pub use account::AccountNumberDetector;
pub use card::{luhn_valid, CreditCardDetector, LuhnValidator};
pub use custom::CustomPatternDetector;
pub use dob::{days_in_month, is_leap_year, BirthDateValidator, DateOfBirthDetector};
pub use email::EmailDetector;
pub use phone::PhoneNumberDetector;
pub use ssn::SsnDetector;

use crate::config::RedactionConfig;
use crate::error::RedactorResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Kind of personal data a finding represents.
///
/// Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Ssn,
    CreditCard,
    #[serde(rename = "phone_number")]
    Phone,
    DateOfBirth,
    AccountNumber,
    /// User-supplied pattern from the configuration.
    Custom,
}

impl Category {
    /// The six categories detected out of the box.
    pub const BUILTIN: [Category; 6] = [
        Category::Email,
        Category::Ssn,
        Category::CreditCard,
        Category::Phone,
        Category::DateOfBirth,
        Category::AccountNumber,
    ];

    /// Every category, in report order.
    pub const ALL: [Category; 7] = [
        Category::Email,
        Category::Ssn,
        Category::CreditCard,
        Category::Phone,
        Category::DateOfBirth,
        Category::AccountNumber,
        Category::Custom,
    ];

    /// Overlap precedence; higher wins.
    ///
    /// SSN = CreditCard > Phone = DateOfBirth > Email > Custom > AccountNumber
    pub fn precedence(self) -> u8 {
        match self {
            Category::Ssn | Category::CreditCard => 5,
            Category::Phone | Category::DateOfBirth => 4,
            Category::Email => 3,
            Category::Custom => 2,
            Category::AccountNumber => 1,
        }
    }

    /// Categories whose raw matches claim digits this category must not reuse.
    pub fn yields_to(self) -> &'static [Category] {
        match self {
            Category::AccountNumber => &[Category::CreditCard, Category::Ssn, Category::Phone],
            _ => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::Ssn => "ssn",
            Category::CreditCard => "credit_card",
            Category::Phone => "phone_number",
            Category::DateOfBirth => "date_of_birth",
            Category::AccountNumber => "account_number",
            Category::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unvalidated (or freshly validated) pattern match.
///
/// `start` and `end` are byte offsets into the concatenated page text,
/// always on `char` boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
    pub matched_text: String,
}

impl Candidate {
    pub fn new(category: Category, start: usize, end: usize, text: &str, confidence: f64) -> Self {
        Self {
            category,
            start,
            end,
            confidence,
            matched_text: text[start..end].to_string(),
        }
    }

    /// True when the two half-open spans share at least one byte.
    pub fn intersects(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// ASCII digits of the matched text, separators removed.
    pub fn digits(&self) -> String {
        self.matched_text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}

/// Outcome of secondary validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Keep the candidate with the given confidence.
    Keep(f64),
    /// Not a finding of this category.
    Discard,
}

/// Syntax-level matcher for one category.
pub trait PatternDetector: Send + Sync {
    fn category(&self) -> Category;

    /// Every match in `text`. Never fails; malformed input simply yields nothing.
    fn detect(&self, text: &str) -> Vec<Candidate>;
}

/// Semantic confirmation paired with a detector.
pub trait Validator: Send + Sync {
    fn validate(&self, candidate: &Candidate) -> Verdict;
}

/// Validator for categories with no check beyond their grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, candidate: &Candidate) -> Verdict {
        Verdict::Keep(candidate.confidence)
    }
}

/// True when the match is not glued to further ASCII digits on either side.
pub(crate) fn digit_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

/// Collects digit-bounded matches of `pattern` accepted by `accept`.
///
/// A rejected match restarts the search one character later, so a prefix
/// glued to a preceding digit (`21 555-123-4567`) does not hide the number.
pub(crate) fn scan_digits<F>(
    pattern: &Regex,
    text: &str,
    category: Category,
    confidence: f64,
    accept: F,
) -> Vec<Candidate>
where
    F: Fn(&str) -> bool,
{
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(m) = pattern.find_at(text, pos) {
        if digit_bounded(text, m.start(), m.end()) && accept(m.as_str()) {
            found.push(Candidate::new(category, m.start(), m.end(), text, confidence));
            pos = m.end();
        } else {
            pos = m.start()
                + text[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        if pos >= text.len() {
            break;
        }
    }

    found
}

struct DetectorEntry {
    detector: Box<dyn PatternDetector>,
    validator: Box<dyn Validator>,
}

/// Fixed, ordered registry of detector/validator pairs.
///
/// Built once per planner and shared read-only across page workers.
pub struct DetectorTable {
    entries: Vec<DetectorEntry>,
    confidence_floor: f64,
}

impl DetectorTable {
    /// Compiles every enabled detector from the configuration.
    ///
    /// Registration follows precedence order, so ties inside a page are
    /// always broken the same way.
    pub fn from_config(config: &RedactionConfig) -> RedactorResult<Self> {
        let base = &config.base_confidence;
        let mut entries = Vec::new();

        let mut register =
            |enabled: bool, detector: Box<dyn PatternDetector>, validator: Box<dyn Validator>| {
                if enabled {
                    entries.push(DetectorEntry {
                        detector,
                        validator,
                    });
                }
            };

        register(
            config.is_enabled(Category::Ssn),
            Box::new(SsnDetector::new(base.ssn)),
            Box::new(AcceptAll),
        );
        register(
            config.is_enabled(Category::CreditCard),
            Box::new(CreditCardDetector::new(base.credit_card)),
            Box::new(LuhnValidator::new(base.validated_card)),
        );
        register(
            config.is_enabled(Category::Phone),
            Box::new(PhoneNumberDetector::new(base.phone)),
            Box::new(AcceptAll),
        );
        register(
            config.is_enabled(Category::DateOfBirth),
            Box::new(DateOfBirthDetector::new(base.date_of_birth)),
            Box::new(BirthDateValidator::new(config.dob_year_range)),
        );
        register(
            config.is_enabled(Category::Email),
            Box::new(EmailDetector::new(base.email)),
            Box::new(AcceptAll),
        );
        if !config.custom_patterns.is_empty() {
            register(
                true,
                Box::new(CustomPatternDetector::new(&config.custom_patterns)?),
                Box::new(AcceptAll),
            );
        }
        register(
            config.is_enabled(Category::AccountNumber),
            Box::new(AccountNumberDetector::new(base.account_number)),
            Box::new(AcceptAll),
        );

        Ok(Self {
            entries,
            confidence_floor: config.confidence_floor,
        })
    }

    /// Categories registered in this table, in registration order.
    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|e| e.detector.category()).collect()
    }

    /// Runs detection, claim filtering and validation over one page of text.
    ///
    /// A candidate is dropped when a category it yields to matched an
    /// overlapping span (even if that match later fails validation), when
    /// its validator discards it, or when its confidence falls below the
    /// floor. The result is sorted by `(start, end, category)`.
    pub fn detect(&self, text: &str) -> Vec<Candidate> {
        let mut raw: Vec<(usize, Candidate)> = self
            .entries
            .iter()
            .enumerate()
            .flat_map(|(idx, e)| e.detector.detect(text).into_iter().map(move |c| (idx, c)))
            .collect();

        let claims: Vec<Candidate> = raw
            .iter()
            .filter(|(_, c)| {
                Category::BUILTIN
                    .iter()
                    .any(|cat| cat.yields_to().contains(&c.category))
            })
            .map(|(_, c)| c.clone())
            .collect();

        raw.retain(|(_, c)| {
            let yields = c.category.yields_to();
            !claims
                .iter()
                .any(|claim| yields.contains(&claim.category) && claim.intersects(c))
        });

        let mut kept: Vec<Candidate> = raw
            .into_iter()
            .filter_map(|(idx, mut candidate)| {
                match self.entries[idx].validator.validate(&candidate) {
                    Verdict::Keep(confidence)
                        if confidence > 0.0 && confidence >= self.confidence_floor =>
                    {
                        candidate.confidence = confidence;
                        Some(candidate)
                    }
                    _ => None,
                }
            })
            .collect();

        kept.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.category.cmp(&b.category))
        });
        kept
    }

    /// Like [`detect`](Self::detect), restricted to `range` of `text`.
    ///
    /// The range edges count as text boundaries; offsets in the result are
    /// relative to the whole of `text`.
    pub fn detect_range(&self, text: &str, range: Range<usize>) -> Vec<Candidate> {
        let offset = range.start;
        let mut found = self.detect(&text[range]);
        for candidate in &mut found {
            candidate.start += offset;
            candidate.end += offset;
        }
        found
    }
}
