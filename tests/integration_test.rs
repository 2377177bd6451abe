//! End-to-end tests from positioned page text to redaction blocks.

use redact_plan::{Category, PageText, RedactionPlanner, ReportAggregator};

mod common;
use common::*;

fn planner() -> RedactionPlanner {
    RedactionPlanner::with_defaults().expect("default planner")
}

#[test]
fn test_email_and_phone_on_one_line() {
    let page = single_line_page("Contact: jane.doe@example.com or 555-123-4567");
    let (plan, report) = planner().plan_with_report(&[page]);

    assert_categories(&plan, &[Category::Email, Category::Phone]);
    assert_no_overlap(&plan);
    // "jane.doe@example.com" is characters 9..=28, the phone 33..=44
    assert_eq!(plan.blocks[0].rect, char_span_rect(0, 9, 28));
    assert_eq!(plan.blocks[1].rect, char_span_rect(0, 33, 44));
    assert_eq!(plan.blocks[0].confidence, 0.9);
    assert_eq!(plan.blocks[1].confidence, 0.75);
    assert_eq!(report.total_blocks, 2);
}

#[test]
fn test_valid_card_single_block() {
    let page = single_line_page("Card: 4532015112830366");
    let plan = planner().plan(&[page]);

    assert_categories(&plan, &[Category::CreditCard]);
    assert_eq!(plan.blocks[0].confidence, 0.95);
    assert_eq!(plan.blocks[0].rect, char_span_rect(0, 6, 21));
}

#[test]
fn test_grouped_card_followed_by_short_number() {
    let planner = planner();

    let plan = planner.plan(&[single_line_page("Card 4111 1111 1111 1111 12")]);
    assert_categories(&plan, &[Category::CreditCard]);
    assert_eq!(plan.blocks[0].rect, char_span_rect(0, 5, 23));

    let plan = planner.plan(&[single_line_page("Card 4111-1111-1111-1111-7")]);
    assert_categories(&plan, &[Category::CreditCard]);
    assert_eq!(plan.blocks[0].rect, char_span_rect(0, 5, 23));

    let plan = planner.plan(&[single_line_page("Card 4532 0151 1283 0366 12 25")]);
    assert_categories(&plan, &[Category::CreditCard]);
    assert_eq!(plan.blocks[0].confidence, 0.95);
}

#[test]
fn test_invalid_card_no_blocks() {
    let page = single_line_page("Card: 4532015112830367");
    let plan = planner().plan(&[page]);

    assert!(plan.blocks.is_empty(), "unexpected blocks: {:?}", plan.blocks);
}

#[test]
fn test_impossible_birth_date_no_blocks() {
    let page = single_line_page("DOB: 02/30/1990");
    let plan = planner().plan(&[page]);

    assert!(plan.blocks.is_empty());
}

#[test]
fn test_valid_birth_date() {
    let page = single_line_page("DOB: 02/29/1988");
    let plan = planner().plan(&[page]);

    assert_categories(&plan, &[Category::DateOfBirth]);
    assert_eq!(plan.blocks[0].confidence, 0.7);
}

#[test]
fn test_empty_page() {
    let (plan, report) = planner().plan_with_report(&[PageText::default()]);

    assert!(plan.blocks.is_empty());
    assert!(!plan.is_partial());
    assert_eq!(report.total_blocks, 0);
    assert_eq!(report.pages_processed, 1);
    assert!(report.counts_by_category.values().all(|&c| c == 0));
    assert!(report.overall.is_none());
}

#[test]
fn test_empty_document() {
    let (plan, report) = planner().plan_with_report(&[]);

    assert!(plan.blocks.is_empty());
    assert_eq!(report.pages_processed, 0);
    assert_eq!(report, ReportAggregator::summarize(&plan));
}

#[test]
fn test_ssn_beats_account_number() {
    let page = single_line_page("SSN 123456789");
    let plan = planner().plan(&[page]);

    assert_categories(&plan, &[Category::Ssn]);
    assert_eq!(plan.blocks[0].confidence, 0.85);
}

#[test]
fn test_mixed_document() {
    let pages = vec![
        PageBuilder::new()
            .line("Patient record")
            .line("SSN: 219-09-9999   DOB: 07/04/1976")
            .line("Email: pat.smith+care@clinic.example.org")
            .build(),
        PageBuilder::new()
            .on_page(1)
            .line("Billing")
            .line("Card 4111 1111 1111 1111 on file")
            .line("Account 001234567890 Phone (212) 555-0188")
            .build(),
    ];
    let (plan, report) = planner().plan_with_report(&pages);

    assert_reading_order(&plan);
    assert_categories(
        &plan,
        &[
            Category::Ssn,
            Category::DateOfBirth,
            Category::Email,
            Category::CreditCard,
            Category::AccountNumber,
            Category::Phone,
        ],
    );
    assert_eq!(report.pages_affected, 2);
    assert_eq!(report.counts_by_category[&Category::Phone], 1);
    assert_eq!(plan.blocks_for_page(1).count(), 3);
}

#[test]
fn test_findings_below_floor_dropped() {
    let planner = RedactionPlanner::new(redact_plan::RedactionConfig {
        confidence_floor: 0.6,
        ..Default::default()
    })
    .unwrap();
    let plan = planner.plan(&[single_line_page("Ref 99887766 mail a@b.co")]);

    assert_categories(&plan, &[Category::Email]);
}

#[test]
fn test_custom_pattern_end_to_end() {
    let planner = RedactionPlanner::new(redact_plan::RedactionConfig {
        custom_patterns: vec![redact_plan::CustomPattern {
            name: "member".to_string(),
            pattern: r"MBR-\d{6}".to_string(),
            literal: false,
            confidence: 0.8,
        }],
        ..Default::default()
    })
    .unwrap();
    let plan = planner.plan(&[single_line_page("Member MBR-204481 active")]);

    assert_categories(&plan, &[Category::Custom]);
    assert_eq!(plan.blocks[0].rect, char_span_rect(0, 7, 16));
}
