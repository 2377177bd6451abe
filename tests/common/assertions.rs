//! Custom assertions for redaction plans.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use redact_plan::{Category, RedactionPlan};

/// Asserts that blocks are sorted by `(page_index, rect.y, rect.x)`.
///
/// # Panics
/// Panics at the first pair out of order.
pub fn assert_reading_order(plan: &RedactionPlan) {
    for pair in plan.blocks.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let key_a = (a.page_index, a.rect.y, a.rect.x);
        let key_b = (b.page_index, b.rect.y, b.rect.x);
        assert!(
            key_a.0 < key_b.0
                || (key_a.0 == key_b.0 && key_a.1 < key_b.1)
                || (key_a.0 == key_b.0 && key_a.1 == key_b.1 && key_a.2 <= key_b.2),
            "Blocks out of reading order: {:?} before {:?}",
            key_a,
            key_b
        );
    }
}

/// Asserts the plan's block categories, in order.
///
/// # Panics
/// Panics if the categories differ.
pub fn assert_categories(plan: &RedactionPlan, expected: &[Category]) {
    let actual: Vec<Category> = plan.blocks.iter().map(|b| b.category).collect();
    assert_eq!(
        actual, expected,
        "Unexpected block categories (blocks: {:#?})",
        plan.blocks
    );
}

/// Asserts that no two blocks on the same page overlap.
///
/// # Panics
/// Panics on the first overlapping pair.
pub fn assert_no_overlap(plan: &RedactionPlan) {
    for (i, a) in plan.blocks.iter().enumerate() {
        for b in plan.blocks.iter().skip(i + 1) {
            if a.page_index == b.page_index {
                assert_eq!(
                    a.rect.intersection_area(&b.rect),
                    0.0,
                    "Blocks overlap: {:?} and {:?}",
                    a,
                    b
                );
            }
        }
    }
}
