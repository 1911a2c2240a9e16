//! Authentication endpoints (no bearer token required)

use super::{endpoints, payload, ApiClient, ApiResponse};
use crate::error::Result;
use crate::models::{LoginRequest, RefreshRequest, Registration, VerifyRequest};
use reqwest::header::HeaderMap;

impl ApiClient {
    /// Obtain an access/refresh token pair for the given credentials
    ///
    /// The pair is not stored; see [`ApiClient::login_and_store`].
    pub async fn obtain_token_pair(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let body = payload(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        self.executor
            .post(endpoints::JWT_CREATE, HeaderMap::new(), &body)
            .await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<ApiResponse> {
        let body = payload(&RefreshRequest {
            refresh: refresh_token.to_string(),
        })?;
        self.executor
            .post(endpoints::JWT_REFRESH, HeaderMap::new(), &body)
            .await
    }

    /// Check a token; only the status is meaningful
    pub async fn verify_token(&self, token: &str) -> Result<u16> {
        let body = payload(&VerifyRequest {
            token: token.to_string(),
        })?;
        let response = self
            .executor
            .post(endpoints::JWT_VERIFY, HeaderMap::new(), &body)
            .await?;
        Ok(response.status)
    }

    /// Register a new user
    pub async fn register_user(&self, registration: &Registration) -> Result<ApiResponse> {
        let body = payload(registration)?;
        self.executor
            .post(endpoints::USER_REGISTER, HeaderMap::new(), &body)
            .await
    }
}
