//! Price comparison pipeline
//!
//! Merges several differently-worded price searches, has the synthesizer
//! extract normalized listings, then derives numeric prices, enforces the
//! best-deal invariant, and attaches the savings percentage — all outside
//! the LLM.

use crate::error::{MedInfoError, Result};
use crate::llm::{LLMClient, Synthesizer};
use crate::search::{snippet_text, SearchProvider, SearchResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Hits requested per price query
const PRICE_RESULT_COUNT: usize = 10;

const PRICE_SYSTEM_PROMPT: &str = r#"You are a price extraction expert. From the provided web search results (a JSON list with title, snippet, and link), extract up to 10 price listings for the requested medication.

Rules:
- Analyze the 'snippet' and 'title' for price, store, pack quantity, discount and delivery information.
- The 'link' of the input object MUST be used as the 'url' of the listing.
- Prioritize results that are clearly from online pharmacies or major retailers; ignore informational links that are not selling the product.
- If a snippet mentions a price, you MUST extract it.
- Mark the listing that looks like the best deal with "best_deal": true.
- When an informational context is provided, also fill 'medicine_info' with 'composition', 'manufacturer' and 'description' where the context supports them.
- Output a single raw JSON object, nothing else.

JSON structure:
{
  "prices": [
    { "store": "PharmEasy", "price": "Rs.15.00 for Strip of 15", "quantity": "Strip of 15", "url": "https://...", "discount": null, "delivery_info": null, "best_deal": false }
  ],
  "medicine_info": { "composition": "...", "manufacturer": "...", "description": "..." }
}"#;

/// One normalized price listing for a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceListing {
    #[serde(default)]
    pub store: String,

    #[serde(default)]
    pub price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<String>,

    #[serde(default)]
    pub best_deal: bool,

    /// Derived from `price`, non-authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
}

/// Optional medicine metadata extracted alongside the listings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MedicineInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The assembled price comparison response
#[derive(Debug, Clone, Serialize)]
pub struct PriceComparison {
    pub medicine_name: String,
    pub prices: Vec<PriceListing>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicine_info: Option<MedicineInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExtractedPrices {
    #[serde(default)]
    prices: Vec<PriceListing>,

    #[serde(default)]
    medicine_info: Option<MedicineInfo>,
}

/// Orchestrates the price comparison flow over injected providers
pub struct PricePipeline {
    search: Arc<dyn SearchProvider>,
    synthesizer: Synthesizer,
}

impl PricePipeline {
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            search,
            synthesizer: Synthesizer::new(llm),
        }
    }

    /// Compare prices for a medicine name across online stores
    pub async fn run(&self, medicine_name: &str) -> Result<PriceComparison> {
        let hits = self.gather_price_hits(medicine_name).await?;
        if hits.is_empty() {
            return Ok(PriceComparison {
                medicine_name: medicine_name.to_string(),
                prices: Vec::new(),
                medicine_info: None,
                image_url: None,
            });
        }

        let info_context = self.gather_info_context(medicine_name).await;
        let (mut prices, medicine_info) = self
            .extract_listings(medicine_name, &hits, &info_context)
            .await?;

        derive_numeric_prices(&mut prices);
        enforce_best_deal(&mut prices);
        sort_listings(&mut prices);
        attach_savings(&mut prices);

        let image_url = self.search.find_image(medicine_name).await;

        Ok(PriceComparison {
            medicine_name: medicine_name.to_string(),
            prices,
            medicine_info,
            image_url,
        })
    }

    /// Merge several differently-worded price searches. Missing credentials
    /// abort; any other per-query failure only loses that query's hits.
    async fn gather_price_hits(&self, medicine_name: &str) -> Result<Vec<SearchResult>> {
        let mut merged = Vec::new();
        for query in price_queries(medicine_name) {
            match self.search.search(&query, PRICE_RESULT_COUNT).await {
                Ok(hits) => merged.extend(hits),
                Err(err @ MedInfoError::Config(_)) => return Err(err),
                Err(err) => tracing::warn!("price search '{}' failed: {}", query, err),
            }
        }
        Ok(merged)
    }

    async fn gather_info_context(&self, medicine_name: &str) -> String {
        let query = format!("\"{}\" uses dosage manufacturer information", medicine_name);
        match self.search.search(&query, PRICE_RESULT_COUNT).await {
            Ok(hits) => snippet_text(&hits),
            Err(err) => {
                tracing::warn!("info search failed: {}", err);
                String::new()
            }
        }
    }

    /// One synthesis call extracts the listing array and optional metadata.
    /// A synthesis failure degrades to an empty listing array.
    async fn extract_listings(
        &self,
        medicine_name: &str,
        hits: &[SearchResult],
        info_context: &str,
    ) -> Result<(Vec<PriceListing>, Option<MedicineInfo>)> {
        let mut user_prompt = format!(
            "Extract price information for '{}' from the following search results:\n\n{}",
            medicine_name,
            serde_json::to_string_pretty(hits)?
        );
        if !info_context.is_empty() {
            user_prompt.push_str(&format!(
                "\n\nINFORMATIONAL CONTEXT:\n{}",
                info_context
            ));
        }

        let value = match self
            .synthesizer
            .synthesize(PRICE_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(value) => value,
            Err(err @ MedInfoError::Config(_)) => return Err(err),
            Err(err) => {
                tracing::warn!("price extraction failed: {}", err);
                return Ok((Vec::new(), None));
            }
        };

        let extracted: ExtractedPrices = serde_json::from_value(value).unwrap_or_default();
        Ok((extracted.prices, extracted.medicine_info))
    }
}

fn price_queries(medicine_name: &str) -> Vec<String> {
    vec![
        format!("buy \"{}\" online price", medicine_name),
        format!("\"{}\" price comparison online pharmacy india", medicine_name),
        format!("\"{}\" tablet price 1mg netmeds pharmeasy", medicine_name),
    ]
}

/// First run of digits (with optional decimal part) in a price string
fn extract_numeric_price(price: &str) -> Option<f64> {
    lazy_static! {
        static ref PRICE_RE: Regex = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    }
    PRICE_RE.find(price).and_then(|m| m.as_str().parse().ok())
}

fn derive_numeric_prices(listings: &mut [PriceListing]) {
    for listing in listings.iter_mut() {
        listing.numeric_price = extract_numeric_price(&listing.price);
        listing.savings_percent = None;
    }
}

/// When any numeric price parses, exactly the minimum-priced listing carries
/// the best-deal flag. Without numeric prices the model's flags are kept,
/// trimmed to at most one.
fn enforce_best_deal(listings: &mut [PriceListing]) {
    match min_numeric_index(listings) {
        Some(min_idx) => {
            for (i, listing) in listings.iter_mut().enumerate() {
                listing.best_deal = i == min_idx;
            }
        }
        None => {
            let mut seen = false;
            for listing in listings.iter_mut() {
                if listing.best_deal {
                    listing.best_deal = !seen;
                    seen = true;
                }
            }
        }
    }
}

/// Stable sort: best deals first, then lexically by price string
fn sort_listings(listings: &mut [PriceListing]) {
    listings.sort_by(|a, b| {
        (!a.best_deal, a.price.as_str()).cmp(&(!b.best_deal, b.price.as_str()))
    });
}

/// Savings between the max and min numeric price, attached only to the
/// minimum-priced listing, rounded to two decimals
fn attach_savings(listings: &mut [PriceListing]) {
    let Some(min_idx) = min_numeric_index(listings) else {
        return;
    };
    let min_price = listings[min_idx].numeric_price.unwrap_or_default();
    let max_price = listings
        .iter()
        .filter_map(|listing| listing.numeric_price)
        .fold(min_price, f64::max);

    if max_price > min_price && max_price > 0.0 {
        let percent = (max_price - min_price) / max_price * 100.0;
        listings[min_idx].savings_percent = Some((percent * 100.0).round() / 100.0);
    }
}

fn min_numeric_index(listings: &[PriceListing]) -> Option<usize> {
    listings
        .iter()
        .enumerate()
        .filter_map(|(i, listing)| listing.numeric_price.map(|price| (i, price)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
}
