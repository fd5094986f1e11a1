use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use super::reset_message_body;
use crate::account::errors::MailerError;
use crate::account::models::EmailAddress;
use crate::account::ports::PasswordResetMailer;
use crate::config::MailConfig;

const RESET_SUBJECT: &str = "Reset your password";

/// STARTTLS SMTP delivery of password reset links.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a pooled transport for `host` using the port, credentials and
    /// sender from `config`.
    ///
    /// # Errors
    /// * `InvalidMessage` - `mail.from` is not a valid mailbox
    /// * `DeliveryFailed` - The relay could not be configured
    pub fn new(host: &str, config: &MailConfig) -> Result<Self, MailerError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailerError::InvalidMessage(format!("Invalid sender: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailerError::DeliveryFailed(e.to_string()))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl PasswordResetMailer for SmtpMailer {
    async fn send_reset_link(&self, to: &EmailAddress, link: &str) -> Result<(), MailerError> {
        let recipient = to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|e| MailerError::InvalidMessage(format!("Invalid recipient: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(RESET_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(reset_message_body(link))
            .map_err(|e| MailerError::InvalidMessage(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::DeliveryFailed(e.to_string()))?;

        tracing::debug!(recipient = %to, "Password reset mail delivered");
        Ok(())
    }
}
