//! Alternative medicine endpoint

use super::MedicineQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use medinfo_core::{AlternativeReport, AlternativesPipeline};
use std::sync::Arc;

/// `POST /alternative-medicine-price {medicine_name}` — same-composition
/// brands with price context for the original
pub async fn alternative_medicine_price(
    State(state): State<AppState>,
    Json(request): Json<MedicineQuery>,
) -> Result<Json<AlternativeReport>, ApiError> {
    let medicine_name = request.name()?;

    let pipeline = AlternativesPipeline::new(Arc::clone(&state.search), Arc::clone(&state.llm));
    let report = pipeline.run(medicine_name).await?;

    Ok(Json(report))
}
