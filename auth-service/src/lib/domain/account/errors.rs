use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Facebook Graph API lookups
#[derive(Debug, Clone, Error)]
pub enum FacebookError {
    #[error("Facebook rejected the access token: {0}")]
    InvalidToken(String),

    #[error("Facebook profile has no email address")]
    MissingEmail,

    #[error("Facebook request failed: {0}")]
    Upstream(String),
}

/// Error for password reset mail delivery
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Failed to build message: {0}")]
    InvalidMessage(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Input validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid name: {0} must not be empty")]
    InvalidName(&'static str),

    #[error("Invalid reset link: {0}")]
    InvalidLink(String),

    // Domain-level errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password reset token is invalid or expired")]
    InvalidResetToken,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("No account registered with email: {0}")]
    EmailNotFound(String),

    #[error("Facebook account already linked: {0}")]
    FacebookAccountAlreadyLinked(String),

    // Collaborator errors
    #[error(transparent)]
    Facebook(#[from] FacebookError),

    #[error("Mailer error: {0}")]
    Mailer(#[from] MailerError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
