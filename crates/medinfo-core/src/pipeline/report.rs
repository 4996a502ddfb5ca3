//! Drug report pipeline
//!
//! Linear four-stage orchestration: composition discovery, category context
//! gathering, one-shot synthesis, response assembly. No branching back.

use super::title_case;
use crate::error::{MedInfoError, Result};
use crate::llm::{LLMClient, Synthesizer};
use crate::search::{snippet_text, ContextBuilder, SearchProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Hits requested for the composition discovery search
const COMPOSITION_RESULT_COUNT: usize = 5;

/// Hits requested per category context search
const CATEGORY_RESULT_COUNT: usize = 10;

const COMPOSITION_SYSTEM_PROMPT: &str = "You are a drug composition extractor. From the user \
     query and the web context, identify the drug's exact chemical composition. Output ONLY a \
     single raw JSON object with one key, 'composition'. \
     Example: {\"composition\": \"Paracetamol 500mg\"}";

const REPORT_SYSTEM_PROMPT: &str = r#"You are a drug information synthesizer. Analyze the provided pre-categorized web search contexts and produce a single comprehensive JSON report.

Rules:
- For each summary section (uses, side_effects, warnings), build a detailed bulleted list based ONLY on its corresponding context section.
- For 'alternatives', list objects with 'brand_name' and 'manufacturer'. Omit a brand when no manufacturer is clearly associated with it. Find as many as you can.
- For 'generic_info_paragraph', write a professional summary of the drug's class and mechanism of action, based on its context section.
- Output a single raw JSON object, nothing else.

JSON structure:
{
  "generic_info_paragraph": "A detailed paragraph about the generic drug.",
  "summary": {
    "uses": ["..."],
    "side_effects": ["..."],
    "warnings": ["..."]
  },
  "alternatives": [
    { "brand_name": "Brand 1", "manufacturer": "Manufacturer 1" }
  ]
}"#;

/// Bulleted summary sections of a drug report; arrays default to empty
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    #[serde(default)]
    pub uses: Vec<String>,

    #[serde(default)]
    pub side_effects: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A brand marketed with the same composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandAlternative {
    #[serde(default)]
    pub brand_name: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_confidence: Option<u32>,
}

/// The assembled drug report
#[derive(Debug, Clone, Serialize)]
pub struct DrugReport {
    pub identified_medicine: String,
    pub composition: String,
    pub generic_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub generic_info_paragraph: String,
    pub summary: ReportSummary,
    pub alternatives: Vec<BrandAlternative>,
}

/// Fields produced by the final synthesis call; anything the model omitted
/// falls back to empty
#[derive(Debug, Default, Deserialize)]
struct SynthesizedReport {
    #[serde(default)]
    generic_info_paragraph: String,

    #[serde(default)]
    summary: ReportSummary,

    #[serde(default)]
    alternatives: Vec<BrandAlternative>,
}

/// Orchestrates the drug report flow over injected providers
pub struct ReportPipeline {
    search: Arc<dyn SearchProvider>,
    synthesizer: Synthesizer,
}

impl ReportPipeline {
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            search,
            synthesizer: Synthesizer::new(llm),
        }
    }

    /// Build the full report for a medicine name
    pub async fn run(&self, medicine_name: &str) -> Result<DrugReport> {
        let composition = self.discover_composition(medicine_name).await?;
        let generic_name = generic_name_of(&composition);
        tracing::info!(
            "Report: '{}' resolved to composition '{}'",
            medicine_name,
            composition
        );

        let super_context = self.gather_context(&composition, &generic_name).await;
        let synthesized = self.synthesize_report(&composition, &super_context).await?;
        let image_url = self.search.find_image(medicine_name).await;

        Ok(DrugReport {
            identified_medicine: title_case(medicine_name),
            composition,
            generic_name,
            image_url,
            generic_info_paragraph: synthesized.generic_info_paragraph,
            summary: synthesized.summary,
            alternatives: synthesized.alternatives,
        })
    }

    /// Stage 1: find the exact chemical composition for the query.
    /// An empty search result or an inconclusive model reply is a NotFound.
    async fn discover_composition(&self, medicine_name: &str) -> Result<String> {
        let query = format!("\"{}\" composition ingredients", medicine_name);
        let hits = self.search.search(&query, COMPOSITION_RESULT_COUNT).await?;

        if hits.is_empty() {
            return Err(MedInfoError::NotFound(
                "could not find any composition information for this drug via web search"
                    .to_string(),
            ));
        }

        let context = snippet_text(&hits);
        let value = self
            .synthesizer
            .synthesize(
                COMPOSITION_SYSTEM_PROMPT,
                &format!("CONTEXT: {}\nUSER QUERY: {}", context, medicine_name),
            )
            .await?;

        match value.get("composition").and_then(|v| v.as_str()) {
            Some(composition) if !composition.trim().is_empty() => {
                Ok(composition.trim().to_string())
            }
            _ => Err(MedInfoError::NotFound(
                "the AI could not determine the drug's composition from the search results"
                    .to_string(),
            )),
        }
    }

    /// Stage 2: build the categorized super-context. A failed category search
    /// is recorded inline rather than aborting the report.
    async fn gather_context(&self, composition: &str, generic_name: &str) -> String {
        let mut context = ContextBuilder::new();

        for (category, queries) in category_queries(composition, generic_name) {
            let mut section = String::new();
            for query in queries {
                match self.search.search(&query, CATEGORY_RESULT_COUNT).await {
                    Ok(hits) => {
                        let text = snippet_text(&hits);
                        if !section.is_empty() && !text.is_empty() {
                            section.push(' ');
                        }
                        section.push_str(&text);
                    }
                    Err(err) => {
                        tracing::warn!("context search for '{}' failed: {}", category, err);
                    }
                }
            }
            context.push_section(category, &section);
        }

        context.finish()
    }

    /// Stage 3: one synthesis call over the whole super-context. A synthesis
    /// failure short-circuits the report.
    async fn synthesize_report(
        &self,
        composition: &str,
        super_context: &str,
    ) -> Result<SynthesizedReport> {
        let user_prompt = format!(
            "CONTEXTS:\n{}\n\nUSER QUERY: Create a full report for a drug with composition: {}",
            super_context, composition
        );
        let value = self
            .synthesizer
            .synthesize(REPORT_SYSTEM_PROMPT, &user_prompt)
            .await?;

        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

/// The generic name is the first whitespace token of the composition
fn generic_name_of(composition: &str) -> String {
    composition
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Fixed category queries plus alternative-brand variants, keyed by the
/// context section they ground
fn category_queries(composition: &str, generic_name: &str) -> Vec<(&'static str, Vec<String>)> {
    vec![
        (
            "uses",
            vec![format!("\"{}\" detailed uses and indications", composition)],
        ),
        (
            "side_effects",
            vec![format!(
                "\"{}\" common and rare side effects professional",
                composition
            )],
        ),
        (
            "warnings",
            vec![format!("\"{}\" contraindications and warnings", composition)],
        ),
        (
            "alternatives",
            vec![
                format!(
                    "\"{}\" brand names and manufacturers in india",
                    composition
                ),
                format!("\"{}\" substitute brands same salt", generic_name),
                format!("medicines containing \"{}\" brand list", generic_name),
            ],
        ),
        (
            "generic_info",
            vec![format!(
                "what is \"{}\" medicine class and mechanism of action",
                generic_name
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_name_is_first_token() {
        assert_eq!(generic_name_of("Paracetamol 500mg"), "Paracetamol");
        assert_eq!(generic_name_of("Amoxicillin"), "Amoxicillin");
        assert_eq!(generic_name_of(""), "");
    }

    #[test]
    fn test_category_queries_cover_all_sections() {
        let queries = category_queries("Paracetamol 500mg", "Paracetamol");
        let categories: Vec<_> = queries.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                "uses",
                "side_effects",
                "warnings",
                "alternatives",
                "generic_info"
            ]
        );

        // alternative-brand variants ride along in the alternatives section
        let alternatives = &queries[3].1;
        assert!(alternatives.len() > 1);
        assert!(alternatives[0].contains("Paracetamol 500mg"));
    }

    #[test]
    fn test_synthesized_report_defaults_missing_fields() {
        let value = serde_json::json!({
            "generic_info_paragraph": "An analgesic.",
            "summary": { "uses": ["pain relief"] }
        });
        let report: SynthesizedReport = serde_json::from_value(value).unwrap();
        assert_eq!(report.summary.uses, vec!["pain relief"]);
        assert!(report.summary.side_effects.is_empty());
        assert!(report.summary.warnings.is_empty());
        assert!(report.alternatives.is_empty());
    }
}
