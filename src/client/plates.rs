//! Plate endpoints

use super::{endpoints, payload, ApiClient, ApiResponse};
use crate::error::Result;
use crate::models::PlateRequest;

impl ApiClient {
    /// Plates with server-computed nutrition, price and rating
    pub async fn plates(&self) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(endpoints::PLATES, headers).await
    }

    /// Compose a plate from protein, garnish and vegetable dish ids
    pub async fn create_plate(&self, protein: i64, garnish: i64, vegetable: i64) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let body = payload(&PlateRequest {
            protein,
            garnish,
            vegetable,
        })?;
        self.executor.post(endpoints::PLATES, headers, &body).await
    }

    pub async fn plate(&self, plate_id: i64) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(&endpoints::plate(plate_id), headers).await
    }
}
