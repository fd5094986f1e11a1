use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::FacebookError;
use crate::account::errors::MailerError;
use crate::account::models::EmailAddress;
use crate::account::models::FacebookProfile;
use crate::account::models::RegisterForm;
use crate::account::models::User;
use crate::account::models::UserId;

/// Port for authentication operations consumed by the HTTP layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, password-less account or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Create an account from a registration form and issue an access token.
    ///
    /// # Errors
    /// * `InvalidEmail` / `InvalidPassword` / `InvalidName` - Form failed validation
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, form: RegisterForm) -> Result<String, AuthError>;

    /// Mail a password reset link built from `link` to the account owner.
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `link` - URL template; `{token}` is replaced by the reset token,
    ///   otherwise the token is appended as a `token` query parameter
    ///
    /// # Errors
    /// * `EmailNotFound` - No account with this email
    /// * `InvalidLink` - Template is not a valid URL
    /// * `Mailer` - Delivery failed
    async fn send_password_reset_link(&self, email: &str, link: &str) -> Result<(), AuthError>;

    /// Replace the password of the account a reset token was issued for.
    ///
    /// # Errors
    /// * `InvalidResetToken` - Token is forged, expired, already used or not a reset token
    /// * `InvalidPassword` - New password fails policy
    async fn reset_password(&self, token: &str, password: &str) -> Result<(), AuthError>;

    /// Register (or sign back in) through a Facebook access token.
    ///
    /// # Errors
    /// * `Facebook` - Token rejected, profile has no email, or Graph API unreachable
    /// * `EmailAlreadyExists` - Email belongs to an account not linked to this profile
    async fn register_facebook(&self, access_token: &str) -> Result<String, AuthError>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    async fn find_by_facebook_id(&self, facebook_id: &str) -> Result<Option<User>, AuthError>;

    /// Store a new password hash and bump `updated_at`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed or account vanished
    async fn update_password(&self, id: &UserId, password_hash: String) -> Result<(), AuthError>;
}

/// Delivery of password reset links.
#[async_trait]
pub trait PasswordResetMailer: Send + Sync + 'static {
    async fn send_reset_link(&self, to: &EmailAddress, link: &str) -> Result<(), MailerError>;
}

/// Access-token introspection against Facebook.
#[async_trait]
pub trait FacebookClient: Send + Sync + 'static {
    /// Resolve the profile that owns `access_token`.
    ///
    /// # Errors
    /// * `InvalidToken` - Facebook rejected the token
    /// * `Upstream` - Network or unexpected response failure
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, FacebookError>;
}
