//! Medinfo Core Library
//!
//! Core functionality for the medinfo medicine-information aggregator.
//!
//! # Features
//! - Paginated web search gateway with normalized results
//! - LLM synthesis of structured drug reports from categorized snippets
//! - Price comparison and brand-alternative discovery pipelines
//! - Haversine ranking of Jan Aushadhi dispensaries

pub mod config;
pub mod error;
pub mod geo;
pub mod llm;
pub mod pipeline;
pub mod search;

pub use config::{Config, LLMServiceConfig, SearchServiceConfig};
pub use error::{Error, MedInfoError, Result};
pub use geo::{haversine_km, kendra_directory, nearest, Kendra, NearestKendras};
pub use llm::{ChatMessage, GroqClient, LLMClient, Synthesizer};
pub use pipeline::{
    AlternativeReport, AlternativesPipeline, Assistant, BrandAlternative, DrugReport,
    MedicineInfo, OriginalMedicine, PriceComparison, PriceListing, PricePipeline,
    RankedAlternative, ReportPipeline, ReportSummary,
};
pub use search::{snippet_text, ContextBuilder, SearchProvider, SearchResult, WebSearchClient};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "medinfo";
