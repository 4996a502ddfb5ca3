//! Request handlers, one module per endpoint

pub mod alternatives;
pub mod assistant;
pub mod health;
pub mod kendras;
pub mod prices;
pub mod search;

use crate::error::ApiError;
use medinfo_core::MedInfoError;
use serde::Deserialize;

/// Request body shared by the medicine endpoints
#[derive(Debug, Deserialize)]
pub struct MedicineQuery {
    #[serde(default)]
    pub medicine_name: String,
}

impl MedicineQuery {
    /// Trimmed medicine name; blank input is a 400
    pub fn name(&self) -> Result<&str, ApiError> {
        let name = self.medicine_name.trim();
        if name.is_empty() {
            return Err(MedInfoError::InvalidInput("please enter a medicine name".to_string()).into());
        }
        Ok(name)
    }
}
