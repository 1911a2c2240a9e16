//! Plate composition models

use serde::Serialize;

/// Plate built from three dish ids
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlateRequest {
    #[serde(rename = "proteinproduct")]
    pub protein: i64,
    #[serde(rename = "garnishproduct")]
    pub garnish: i64,
    #[serde(rename = "vegetableproduct")]
    pub vegetable: i64,
}
