//! Drug report endpoint

use super::MedicineQuery;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use medinfo_core::{DrugReport, ReportPipeline};
use std::sync::Arc;

/// `POST /search {medicine_name}` — full structured drug report
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<MedicineQuery>,
) -> Result<Json<DrugReport>, ApiError> {
    let medicine_name = request.name()?;

    let pipeline = ReportPipeline::new(Arc::clone(&state.search), Arc::clone(&state.llm));
    let report = pipeline.run(medicine_name).await?;

    tracing::info!(
        "report for '{}' generated with {} alternatives",
        medicine_name,
        report.alternatives.len()
    );
    Ok(Json(report))
}
