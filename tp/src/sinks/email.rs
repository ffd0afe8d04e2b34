//! Email delivery over SMTP with STARTTLS

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::{EmailSink, SinkError};
use crate::config::ResolvedEmailConfig;

/// Sends the itinerary as a plain-text message
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: ResolvedEmailConfig,
}

impl SmtpMailer {
    pub fn new(config: ResolvedEmailConfig) -> Self {
        Self { config }
    }

    fn mailbox(address: &str) -> Result<Mailbox, SinkError> {
        address.trim().parse::<Mailbox>().map_err(|e| SinkError::Address {
            address: address.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn build_message(&self, text: &str, recipient: &str) -> Result<Message, SinkError> {
        Message::builder()
            .from(Self::mailbox(&self.config.sender)?)
            .to(Self::mailbox(recipient)?)
            .subject(self.config.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(text.to_string())
            .map_err(|e| SinkError::Email(e.to_string()))
    }
}

#[async_trait]
impl EmailSink for SmtpMailer {
    async fn send(&self, text: &str, recipient: &str) -> Result<(), SinkError> {
        debug!(%recipient, host = %self.config.smtp_host, port = self.config.smtp_port, "SmtpMailer::send: called");
        let message = self.build_message(text, recipient)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| SinkError::Email(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| SinkError::Email(e.to_string()))?;
        Ok(())
    }
}
