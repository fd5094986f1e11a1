use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Value of the `purpose` claim carried by password-reset tokens.
pub const PASSWORD_RESET_PURPOSE: &str = "password_reset";

/// Claims of an access token issued on login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User identifier
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Claims for `user_id` valid for `expiration_hours` from now.
    pub fn new(user_id: impl ToString, email: impl ToString, expiration_hours: i64) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiration_hours)).timestamp(),
        }
    }
}

/// Claims of a single-use password-reset token.
///
/// `pwd` holds the fingerprint of the password hash at issue time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetClaims {
    pub sub: String,
    pub purpose: String,
    pub pwd: String,
    pub iat: i64,
    pub exp: i64,
}

impl ResetClaims {
    pub fn new(
        user_id: impl ToString,
        password_fingerprint: String,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            purpose: PASSWORD_RESET_PURPOSE.to_string(),
            pwd: password_fingerprint,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expiration_minutes)).timestamp(),
        }
    }

    pub fn is_password_reset(&self) -> bool {
        self.purpose == PASSWORD_RESET_PURPOSE
    }
}
