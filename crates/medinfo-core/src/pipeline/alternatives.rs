//! Alternative medicine finder pipeline
//!
//! Independent extraction goals against the synthesizer: active ingredients,
//! candidate alternative brands, a best-guess price, and category/primary-use
//! info. Failure of one goal leaves only its own fields empty — except the
//! brand search, which needs the extracted ingredients as its input.

use super::title_case;
use crate::error::{MedInfoError, Result};
use crate::llm::{LLMClient, Synthesizer};
use crate::search::{snippet_text, SearchProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Hits requested per extraction search
const ALTERNATIVE_RESULT_COUNT: usize = 10;

/// Alternatives below this confidence are dropped
const MIN_MATCH_CONFIDENCE: u32 = 70;

const INGREDIENTS_SYSTEM_PROMPT: &str = "You are a pharmaceutical ingredient extractor. From \
     the web context, identify the active ingredients (salts) of the queried medicine, with \
     strengths where stated. Output ONLY a single raw JSON object: \
     {\"active_ingredients\": [\"Paracetamol 500mg\"]}";

const ALTERNATIVES_SYSTEM_PROMPT: &str = "You are a brand alternative finder. From the web \
     context, list brands that contain the given active ingredients. For each, give the brand \
     name, its manufacturer, and a match_confidence between 0 and 100 for how certain you are \
     that it shares the same composition. Output ONLY a single raw JSON object: \
     {\"alternatives\": [{\"brand_name\": \"...\", \"manufacturer\": \"...\", \
     \"match_confidence\": 90}]}";

const PRICE_GUESS_SYSTEM_PROMPT: &str = "You are a price spotter. From the web context, give \
     your best single guess for the current online price of the queried medicine as one short \
     string. Output ONLY a single raw JSON object: {\"price\": \"Rs.30 for strip of 15\"}";

const CLASSIFY_SYSTEM_PROMPT: &str = "You are a drug classifier. From the web context, name \
     the medicine's therapeutic category and its primary use in one short phrase each. Output \
     ONLY a single raw JSON object: {\"category\": \"...\", \"primary_use\": \"...\"}";

/// A candidate brand sharing the original's active ingredients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAlternative {
    #[serde(default)]
    pub brand_name: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default)]
    pub match_confidence: u32,
}

/// What was learned about the medicine the user asked for
#[derive(Debug, Clone, Serialize, Default)]
pub struct OriginalMedicine {
    pub name: String,
    pub active_ingredients: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_use: Option<String>,
}

/// The assembled alternative-finder response
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeReport {
    pub original_medicine: OriginalMedicine,
    pub alternatives: Vec<RankedAlternative>,
}

/// Orchestrates the alternative-finder flow over injected providers
pub struct AlternativesPipeline {
    search: Arc<dyn SearchProvider>,
    synthesizer: Synthesizer,
}

impl AlternativesPipeline {
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            search,
            synthesizer: Synthesizer::new(llm),
        }
    }

    /// Find same-composition alternatives and price context for a medicine
    pub async fn run(&self, medicine_name: &str) -> Result<AlternativeReport> {
        let active_ingredients = self.extract_active_ingredients(medicine_name).await?;

        let alternatives = if active_ingredients.is_empty() {
            tracing::warn!(
                "no active ingredients resolved for '{}'; skipping brand search",
                medicine_name
            );
            Vec::new()
        } else {
            self.find_alternatives(&active_ingredients).await?
        };

        let price = self.estimate_price(medicine_name).await?;
        let (category, primary_use) = self.classify(medicine_name).await?;

        Ok(AlternativeReport {
            original_medicine: OriginalMedicine {
                name: title_case(medicine_name),
                active_ingredients,
                price,
                category,
                primary_use,
            },
            alternatives,
        })
    }

    /// Goal (a): active ingredients from composition-oriented search context
    async fn extract_active_ingredients(&self, medicine_name: &str) -> Result<Vec<String>> {
        let query = format!("\"{}\" composition active ingredients salt", medicine_name);
        let context = self.context_for(&query).await?;
        if context.is_empty() {
            return Ok(Vec::new());
        }

        let Some(value) = self
            .synthesize_lenient(
                INGREDIENTS_SYSTEM_PROMPT,
                &format!("CONTEXT: {}\nUSER QUERY: {}", context, medicine_name),
            )
            .await?
        else {
            return Ok(Vec::new());
        };

        let ingredients = value
            .get("active_ingredients")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(ingredients)
    }

    /// Goal (b): candidate brands from ingredient-oriented search context,
    /// filtered by confidence
    async fn find_alternatives(&self, ingredients: &[String]) -> Result<Vec<RankedAlternative>> {
        let joined = ingredients.join(" + ");
        let mut context = String::new();
        for query in [
            format!("\"{}\" alternative brand names manufacturers india", joined),
            format!("brands containing \"{}\" substitutes", joined),
        ] {
            let section = self.context_for(&query).await?;
            if !context.is_empty() && !section.is_empty() {
                context.push(' ');
            }
            context.push_str(&section);
        }
        if context.is_empty() {
            return Ok(Vec::new());
        }

        let Some(value) = self
            .synthesize_lenient(
                ALTERNATIVES_SYSTEM_PROMPT,
                &format!("CONTEXT: {}\nACTIVE INGREDIENTS: {}", context, joined),
            )
            .await?
        else {
            return Ok(Vec::new());
        };

        #[derive(Default, Deserialize)]
        struct Extracted {
            #[serde(default)]
            alternatives: Vec<RankedAlternative>,
        }

        let extracted: Extracted = serde_json::from_value(value).unwrap_or_default();
        Ok(extracted
            .alternatives
            .into_iter()
            .filter(|alt| alt.match_confidence >= MIN_MATCH_CONFIDENCE)
            .collect())
    }

    /// Goal (c): best-guess price string for the original medicine
    async fn estimate_price(&self, medicine_name: &str) -> Result<Option<String>> {
        let query = format!("buy \"{}\" online price india", medicine_name);
        let context = self.context_for(&query).await?;
        if context.is_empty() {
            return Ok(None);
        }

        let Some(value) = self
            .synthesize_lenient(
                PRICE_GUESS_SYSTEM_PROMPT,
                &format!("CONTEXT: {}\nUSER QUERY: {}", context, medicine_name),
            )
            .await?
        else {
            return Ok(None);
        };

        Ok(value
            .get("price")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    /// Goal (d): therapeutic category and primary use
    async fn classify(&self, medicine_name: &str) -> Result<(Option<String>, Option<String>)> {
        let query = format!("what is \"{}\" used for drug class category", medicine_name);
        let context = self.context_for(&query).await?;
        if context.is_empty() {
            return Ok((None, None));
        }

        let Some(value) = self
            .synthesize_lenient(
                CLASSIFY_SYSTEM_PROMPT,
                &format!("CONTEXT: {}\nUSER QUERY: {}", context, medicine_name),
            )
            .await?
        else {
            return Ok((None, None));
        };

        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Ok((field("category"), field("primary_use")))
    }

    /// Search context for one goal. Missing credentials abort the request;
    /// any other failure degrades that goal to empty context.
    async fn context_for(&self, query: &str) -> Result<String> {
        match self.search.search(query, ALTERNATIVE_RESULT_COUNT).await {
            Ok(hits) => Ok(snippet_text(&hits)),
            Err(err @ MedInfoError::Config(_)) => Err(err),
            Err(err) => {
                tracing::warn!("alternative search '{}' failed: {}", query, err);
                Ok(String::new())
            }
        }
    }

    /// Synthesis for one goal: Config aborts, any other failure degrades
    async fn synthesize_lenient(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Option<serde_json::Value>> {
        match self.synthesizer.synthesize(system_prompt, user_prompt).await {
            Ok(value) => Ok(Some(value)),
            Err(err @ MedInfoError::Config(_)) => Err(err),
            Err(err) => {
                tracing::warn!("alternative synthesis failed: {}", err);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_filter_threshold() {
        let raw = serde_json::json!({
            "alternatives": [
                { "brand_name": "A", "manufacturer": "X", "match_confidence": 95 },
                { "brand_name": "B", "manufacturer": "Y", "match_confidence": 70 },
                { "brand_name": "C", "manufacturer": "Z", "match_confidence": 69 }
            ]
        });

        #[derive(Deserialize)]
        struct Extracted {
            alternatives: Vec<RankedAlternative>,
        }

        let extracted: Extracted = serde_json::from_value(raw).unwrap();
        let kept: Vec<_> = extracted
            .alternatives
            .into_iter()
            .filter(|alt| alt.match_confidence >= MIN_MATCH_CONFIDENCE)
            .collect();

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|alt| alt.brand_name != "C"));
    }
}
