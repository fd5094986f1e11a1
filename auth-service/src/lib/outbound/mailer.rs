use async_trait::async_trait;

use crate::account::errors::MailerError;
use crate::account::models::EmailAddress;
use crate::account::ports::PasswordResetMailer;
use crate::config::MailConfig;

pub mod logging;
pub mod smtp;

pub use logging::LogMailer;
pub use smtp::SmtpMailer;

/// Mailer selected from configuration at startup.
pub enum ConfiguredMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl ConfiguredMailer {
    /// SMTP when `mail.smtp_host` is set, log-only otherwise.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailerError> {
        match config.smtp_host.as_deref() {
            Some(host) => Ok(Self::Smtp(SmtpMailer::new(host, config)?)),
            None => {
                tracing::warn!("mail.smtp_host not set, password reset links will only be logged");
                Ok(Self::Log(LogMailer))
            }
        }
    }
}

#[async_trait]
impl PasswordResetMailer for ConfiguredMailer {
    async fn send_reset_link(&self, to: &EmailAddress, link: &str) -> Result<(), MailerError> {
        match self {
            Self::Smtp(mailer) => mailer.send_reset_link(to, link).await,
            Self::Log(mailer) => mailer.send_reset_link(to, link).await,
        }
    }
}

pub(crate) fn reset_message_body(link: &str) -> String {
    format!(
        "Someone asked to reset the password of your account.\n\n\
         Follow this link to choose a new password:\n{}\n\n\
         If you did not ask for this, ignore this message.\n",
        link
    )
}
