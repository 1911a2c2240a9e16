//! Token lifecycle helpers
//! Call an endpoint, then push the result into the credential store

use crate::client::{ApiClient, ApiResponse};
use crate::credentials::CredentialKeys;
use crate::error::Result;
use crate::models::{RefreshedToken, TokenPair};
use tracing::{info, warn};

impl ApiClient {
    /// Log in and persist the returned token pair
    ///
    /// Non-2xx responses, or bodies without both tokens, leave the store untouched.
    pub async fn login_and_store(&mut self, username: &str, password: &str) -> Result<ApiResponse> {
        let response = self.obtain_token_pair(username, password).await?;

        match response.is_success().then(|| response.json::<TokenPair>()).flatten() {
            Some(pair) => {
                self.store_mut().set_many(&[
                    (CredentialKeys::VALID_ACCESS_TOKEN, pair.access.as_str()),
                    (CredentialKeys::VALID_REFRESH_TOKEN, pair.refresh.as_str()),
                ])?;
                info!(status = response.status, "Token pair stored");
            }
            None => warn!(status = response.status, "Login did not return a token pair"),
        }

        Ok(response)
    }

    /// Log in with the stored `valid_email` / `valid_password`
    pub async fn login_with_stored_credentials(&mut self) -> Result<ApiResponse> {
        let username = self.store().get(CredentialKeys::VALID_EMAIL)?;
        let password = self.store().get(CredentialKeys::VALID_PASSWORD)?;
        self.login_and_store(&username, &password).await
    }

    /// Refresh the access token using the stored refresh token
    pub async fn refresh_and_store(&mut self) -> Result<ApiResponse> {
        let refresh = self.store().get(CredentialKeys::VALID_REFRESH_TOKEN)?;
        let response = self.refresh_access_token(&refresh).await?;

        match response.is_success().then(|| response.json::<RefreshedToken>()).flatten() {
            Some(token) => {
                let mut entries = vec![(CredentialKeys::VALID_ACCESS_TOKEN, token.access.as_str())];
                if let Some(rotated) = token.refresh.as_deref() {
                    entries.push((CredentialKeys::VALID_REFRESH_TOKEN, rotated));
                }
                self.store_mut().set_many(&entries)?;
                info!(status = response.status, "Access token refreshed");
            }
            None => warn!(status = response.status, "Refresh did not return an access token"),
        }

        Ok(response)
    }

    /// Change the password and swap the stored current/next passwords
    pub async fn change_password_and_rotate(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiResponse> {
        let response = self.change_password(old_password, new_password).await?;

        if response.is_success() {
            self.store_mut().set_many(&[
                (CredentialKeys::VALID_PASSWORD, new_password),
                (CredentialKeys::NEW_VALID_PASSWORD, old_password),
            ])?;
            info!(status = response.status, "Stored password rotated");
        } else {
            warn!(status = response.status, "Password change rejected");
        }

        Ok(response)
    }
}
