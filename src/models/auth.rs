//! Authentication-related models

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token verification request
#[derive(Debug, Serialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// Access/refresh pair returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Refresh endpoint response; `refresh` is present only when the server rotates it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
