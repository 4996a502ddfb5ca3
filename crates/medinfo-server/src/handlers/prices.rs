//! Price comparison endpoint

use super::MedicineQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use medinfo_core::{PriceComparison, PricePipeline};
use std::sync::Arc;

/// `POST /price-comparison {medicine_name}` — ranked online price listings
pub async fn price_comparison(
    State(state): State<AppState>,
    Json(request): Json<MedicineQuery>,
) -> Result<Json<PriceComparison>, ApiError> {
    let medicine_name = request.name()?;

    let pipeline = PricePipeline::new(Arc::clone(&state.search), Arc::clone(&state.llm));
    let comparison = pipeline.run(medicine_name).await?;

    Ok(Json(comparison))
}
