use async_trait::async_trait;

use crate::account::errors::MailerError;
use crate::account::models::EmailAddress;
use crate::account::ports::PasswordResetMailer;

/// Development mailer: records reset links in the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl PasswordResetMailer for LogMailer {
    async fn send_reset_link(&self, to: &EmailAddress, link: &str) -> Result<(), MailerError> {
        tracing::info!(recipient = %to, "Password reset mail suppressed (no SMTP host)");
        tracing::debug!(recipient = %to, link = %link, "Password reset link");
        Ok(())
    }
}
