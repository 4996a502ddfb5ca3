//! Jan Aushadhi kendra finder endpoints

use crate::error::ApiError;
use axum::Json;
use medinfo_core::{kendra_directory, nearest, NearestKendras};
use serde::Deserialize;
use serde_json::json;

/// Entries returned by the ranked lookup
const TOP_KENDRAS: usize = 10;

#[derive(Debug, Deserialize, Default)]
pub struct KendraQuery {
    #[serde(default)]
    pub lat: f64,

    #[serde(default)]
    pub lng: f64,
}

/// `GET /jan-aushadhi-kendras` — the full static directory
pub async fn list_kendras() -> Json<serde_json::Value> {
    Json(json!({ "kendras": kendra_directory() }))
}

/// `POST /jan-aushadhi-kendras {lat, lng}` — ten closest kendras plus the
/// single nearest
pub async fn nearest_kendras(
    Json(query): Json<KendraQuery>,
) -> Result<Json<NearestKendras>, ApiError> {
    let ranked = nearest(query.lat, query.lng, kendra_directory(), TOP_KENDRAS)?;
    Ok(Json(ranked))
}
