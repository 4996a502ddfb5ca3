//! Medinfo HTTP API
//!
//! Thin axum layer over the medinfo-core pipelines, consumed by the web
//! front end. The router is built here so integration tests can drive it
//! without binding a socket.

mod error;
mod handlers;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::Router;
use medinfo_core::{LLMClient, SearchProvider};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers
///
/// Provider clients are constructed once at process start and read-only
/// thereafter; handlers build the per-use-case pipelines on top of them.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn SearchProvider>,
    pub llm: Arc<dyn LLMClient>,
}

impl AppState {
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LLMClient>) -> Self {
        Self { search, llm }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/search", post(handlers::search::search))
        .route(
            "/price-comparison",
            post(handlers::prices::price_comparison),
        )
        .route(
            "/alternative-medicine-price",
            post(handlers::alternatives::alternative_medicine_price),
        )
        .route("/ai-assistant", post(handlers::assistant::ai_assistant))
        .route(
            "/jan-aushadhi-kendras",
            get(handlers::kendras::list_kendras).post(handlers::kendras::nearest_kendras),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
