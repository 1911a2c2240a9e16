//! Endpoints scoped to the logged-in user

use super::{endpoints, payload, ApiClient, ApiResponse};
use crate::error::Result;
use crate::models::{ChangePasswordRequest, ProfileUpdate};

impl ApiClient {
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let body = payload(&ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })?;
        self.executor
            .post(endpoints::USER_CHANGE_PASSWORD, headers, &body)
            .await
    }

    /// Own profile
    pub async fn me(&self) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        self.executor.get(endpoints::USER_ME, headers).await
    }

    /// Partially update own profile
    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<ApiResponse> {
        let headers = self.authorized_headers()?;
        let body = payload(update)?;
        self.executor.patch(endpoints::USER_ME, headers, &body).await
    }
}
