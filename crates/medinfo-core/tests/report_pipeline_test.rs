//! Integration tests for the drug report pipeline
//!
//! Drives the full composition → context → synthesis → assembly flow
//! against scripted search and LLM doubles.

mod common;

use common::{hit, MockLlm, MockSearch};
use medinfo_core::{LLMClient, MedInfoError, ReportPipeline, SearchProvider};
use std::sync::Arc;

const FULL_SUMMARY: &str = r#"{
    "generic_info_paragraph": "Paracetamol is an analgesic and antipyretic.",
    "summary": {
        "uses": ["Relief of mild to moderate pain", "Reduction of fever"],
        "side_effects": ["Nausea"],
        "warnings": ["Do not exceed 4g per day"]
    },
    "alternatives": [
        { "brand_name": "Crocin", "manufacturer": "GSK" },
        { "brand_name": "Dolo 650", "manufacturer": "Micro Labs" }
    ]
}"#;

fn search_with_context() -> MockSearch {
    MockSearch::new(vec![
        (
            "composition ingredients",
            vec![hit("Paracetamol 500mg tablet composition and ingredients")],
        ),
        ("uses and indications", vec![hit("used for fever and pain")]),
        ("side effects", vec![hit("may cause nausea")]),
        ("contraindications", vec![hit("avoid with liver disease")]),
        ("brand names", vec![hit("sold as Crocin by GSK")]),
        ("mechanism of action", vec![hit("inhibits prostaglandins")]),
    ])
    .with_image("https://img.example.com/paracetamol.jpg")
}

#[tokio::test]
async fn test_full_report_end_to_end() {
    let search = Arc::new(search_with_context());
    let llm = Arc::new(MockLlm::with_replies(vec![
        r#"{"composition": "Paracetamol 500mg"}"#,
        FULL_SUMMARY,
    ]));
    let pipeline = ReportPipeline::new(search, llm);

    let report = pipeline.run("Paracetamol").await.unwrap();

    assert_eq!(report.composition, "Paracetamol 500mg");
    assert_eq!(report.generic_name, "Paracetamol");
    assert_eq!(report.identified_medicine, "Paracetamol");
    assert_eq!(
        report.image_url.as_deref(),
        Some("https://img.example.com/paracetamol.jpg")
    );
    assert_eq!(report.summary.uses.len(), 2);
    assert_eq!(report.summary.warnings, vec!["Do not exceed 4g per day"]);
    assert_eq!(report.alternatives.len(), 2);
    assert_eq!(report.alternatives[0].brand_name, "Crocin");
}

#[tokio::test]
async fn test_empty_composition_search_stops_the_pipeline() {
    let search = Arc::new(MockSearch::empty());
    let llm = Arc::new(MockLlm::with_replies(vec![
        r#"{"composition": "should never be used"}"#,
    ]));
    let pipeline = ReportPipeline::new(
        Arc::clone(&search) as Arc<dyn SearchProvider>,
        Arc::clone(&llm) as Arc<dyn LLMClient>,
    );

    let err = pipeline.run("Unknowndrug").await.unwrap_err();

    assert!(matches!(err, MedInfoError::NotFound(_)));
    // only the composition search ran; no context gathering happened
    assert_eq!(search.search_calls(), 1);
    assert_eq!(llm.completion_calls(), 0);
}

#[tokio::test]
async fn test_inconclusive_composition_is_not_found() {
    let search = Arc::new(search_with_context());
    let llm = Arc::new(MockLlm::with_replies(vec![r#"{"composition": null}"#]));
    let pipeline = ReportPipeline::new(search, llm);

    let err = pipeline.run("Paracetamol").await.unwrap_err();
    assert!(matches!(err, MedInfoError::NotFound(_)));
}

#[tokio::test]
async fn test_final_synthesis_failure_aborts_the_report() {
    let search = Arc::new(search_with_context());
    let llm = Arc::new(
        MockLlm::with_replies(vec![r#"{"composition": "Paracetamol 500mg"}"#]).push_failure(),
    );
    let pipeline = ReportPipeline::new(search, llm);

    let err = pipeline.run("Paracetamol").await.unwrap_err();
    assert!(matches!(err, MedInfoError::Synthesis(_)));
}

#[tokio::test]
async fn test_non_json_completion_is_contained() {
    let search = Arc::new(search_with_context());
    let llm = Arc::new(MockLlm::with_replies(vec![
        "I could not find a composition, sorry.",
    ]));
    let pipeline = ReportPipeline::new(search, llm);

    let err = pipeline.run("Paracetamol").await.unwrap_err();
    assert!(matches!(err, MedInfoError::Synthesis(_)));
}

#[tokio::test]
async fn test_model_omissions_default_to_empty() {
    let search = Arc::new(search_with_context());
    let llm = Arc::new(MockLlm::with_replies(vec![
        r#"{"composition": "Paracetamol 500mg"}"#,
        r#"{"generic_info_paragraph": "An analgesic."}"#,
    ]));
    let pipeline = ReportPipeline::new(search, llm);

    let report = pipeline.run("paracetamol").await.unwrap();

    assert_eq!(report.generic_info_paragraph, "An analgesic.");
    assert!(report.summary.uses.is_empty());
    assert!(report.summary.side_effects.is_empty());
    assert!(report.summary.warnings.is_empty());
    assert!(report.alternatives.is_empty());
}
