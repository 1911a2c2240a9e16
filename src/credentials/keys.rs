//! Credential key constants.

/// Keys read from and written to the credential file
pub struct CredentialKeys;

impl CredentialKeys {
    /// Administrator login
    pub const ADMIN_USERNAME: &'static str = "admin_username";

    /// Administrator password
    pub const ADMIN_PASSWORD: &'static str = "admin_password";

    /// Access token sent as the bearer credential
    pub const VALID_ACCESS_TOKEN: &'static str = "valid_access_token";

    /// Refresh token used to mint new access tokens
    pub const VALID_REFRESH_TOKEN: &'static str = "valid_refresh_token";

    /// Primary test account login
    pub const VALID_EMAIL: &'static str = "valid_email";

    /// Primary test account password
    pub const VALID_PASSWORD: &'static str = "valid_password";

    /// Password the primary account rotates to on the next change
    pub const NEW_VALID_PASSWORD: &'static str = "new_valid_password";

    /// Secondary account login (registration flow)
    pub const VALID_EMAIL_2: &'static str = "valid_email_2";

    /// Secondary account password
    pub const VALID_PASSWORD_2: &'static str = "valid_password_2";

    /// Server-side id of the primary account
    pub const USER_ID: &'static str = "user_id";

    /// All known keys
    pub const ALL: [&'static str; 10] = [
        Self::ADMIN_USERNAME,
        Self::ADMIN_PASSWORD,
        Self::VALID_ACCESS_TOKEN,
        Self::VALID_REFRESH_TOKEN,
        Self::VALID_EMAIL,
        Self::VALID_PASSWORD,
        Self::NEW_VALID_PASSWORD,
        Self::VALID_EMAIL_2,
        Self::VALID_PASSWORD_2,
        Self::USER_ID,
    ];
}
