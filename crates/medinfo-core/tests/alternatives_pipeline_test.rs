//! Integration tests for the alternative medicine finder pipeline

mod common;

use common::{hit, MockLlm, MockSearch};
use medinfo_core::AlternativesPipeline;
use std::sync::Arc;

fn alternatives_search() -> MockSearch {
    MockSearch::new(vec![
        (
            "composition active ingredients",
            vec![hit("Crocin contains Paracetamol 500mg")],
        ),
        (
            "alternative brand names",
            vec![hit("Dolo 650 by Micro Labs, Calpol by GSK")],
        ),
        ("substitutes", vec![hit("paracetamol substitutes list")]),
        ("online price", vec![hit("Crocin at Rs.30 for strip of 15")]),
        ("drug class category", vec![hit("analgesic antipyretic")]),
    ])
}

#[tokio::test]
async fn test_low_confidence_alternatives_are_dropped() {
    let llm = MockLlm::with_replies(vec![
        r#"{"active_ingredients": ["Paracetamol 500mg"]}"#,
        r#"{"alternatives": [
            {"brand_name": "Dolo 650", "manufacturer": "Micro Labs", "match_confidence": 92},
            {"brand_name": "Calpol", "manufacturer": "GSK", "match_confidence": 85},
            {"brand_name": "Sumo", "manufacturer": "Alkem", "match_confidence": 40}
        ]}"#,
        r#"{"price": "Rs.30 for strip of 15"}"#,
        r#"{"category": "Analgesic", "primary_use": "Fever and pain relief"}"#,
    ]);
    let pipeline = AlternativesPipeline::new(Arc::new(alternatives_search()), Arc::new(llm));

    let report = pipeline.run("crocin").await.unwrap();

    assert_eq!(report.original_medicine.name, "Crocin");
    assert_eq!(
        report.original_medicine.active_ingredients,
        vec!["Paracetamol 500mg"]
    );
    assert_eq!(
        report.original_medicine.price.as_deref(),
        Some("Rs.30 for strip of 15")
    );
    assert_eq!(report.original_medicine.category.as_deref(), Some("Analgesic"));
    assert_eq!(
        report.original_medicine.primary_use.as_deref(),
        Some("Fever and pain relief")
    );

    assert_eq!(report.alternatives.len(), 2);
    assert!(report.alternatives.iter().all(|a| a.match_confidence >= 70));
}

#[tokio::test]
async fn test_failed_ingredient_extraction_skips_only_the_brand_search() {
    // first reply (ingredients) is not JSON; the remaining goals still run
    let llm = MockLlm::with_replies(vec![
        "no ingredients for you",
        r#"{"price": "Rs.30 for strip of 15"}"#,
        r#"{"category": "Analgesic", "primary_use": "Fever relief"}"#,
    ]);
    let pipeline = AlternativesPipeline::new(Arc::new(alternatives_search()), Arc::new(llm));

    let report = pipeline.run("crocin").await.unwrap();

    assert!(report.original_medicine.active_ingredients.is_empty());
    assert!(report.alternatives.is_empty());
    assert_eq!(
        report.original_medicine.price.as_deref(),
        Some("Rs.30 for strip of 15")
    );
    assert_eq!(report.original_medicine.category.as_deref(), Some("Analgesic"));
}

#[tokio::test]
async fn test_empty_search_context_degrades_every_goal() {
    let llm = MockLlm::with_replies(vec![]);
    let pipeline = AlternativesPipeline::new(Arc::new(MockSearch::empty()), Arc::new(llm));

    let report = pipeline.run("crocin").await.unwrap();

    assert!(report.original_medicine.active_ingredients.is_empty());
    assert!(report.alternatives.is_empty());
    assert!(report.original_medicine.price.is_none());
    assert!(report.original_medicine.category.is_none());
    assert!(report.original_medicine.primary_use.is_none());
}
