//! Authenticated API client
//!
//! Endpoint methods are grouped by resource in the submodules; each one maps
//! its parameters to a single [`RequestExecutor`] call and returns the
//! response verbatim.

mod auth;
pub mod endpoints;
pub mod executor;
mod food;
mod plates;
pub mod response;
mod users;

pub use executor::RequestExecutor;
pub use response::{ApiResponse, ResponseBody};

use crate::config::ClientConfig;
use crate::credentials::{CredentialKeys, CredentialStore};
use crate::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

/// API client bound to one credential store
#[derive(Debug)]
pub struct ApiClient {
    executor: RequestExecutor,
    store: CredentialStore,
}

impl ApiClient {
    /// Create a client around an already loaded store
    pub fn new(config: &ClientConfig, store: CredentialStore) -> Result<Self> {
        let executor = RequestExecutor::new(&config.api.base_url, config.output.dump_responses)?;
        Ok(Self { executor, store })
    }

    /// Create a client, loading the store found via [`crate::config::CredentialsConfig::resolve`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let store = CredentialStore::load(config.credentials.resolve())?;
        Self::new(config, store)
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CredentialStore {
        &mut self.store
    }

    /// Persist a value into the credential file
    pub fn update_credential(&mut self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }

    /// Bearer headers built from the stored access token
    ///
    /// Fails with [`ClientError::MissingCredential`] when no token is stored.
    pub fn authorized_headers(&self) -> Result<HeaderMap> {
        let token = self.store.get(CredentialKeys::VALID_ACCESS_TOKEN)?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ClientError::Configuration(format!(
                "{} is not a valid header value",
                CredentialKeys::VALID_ACCESS_TOKEN
            ))
        })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// Encode a request payload
fn payload<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ClientError::Configuration(format!("cannot encode request body: {}", e)))
}
