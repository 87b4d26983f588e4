// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP delivery of verification mail via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use timewarden_config::model::MailConfig;
use timewarden_core::{MailSender, WardenError};

/// STARTTLS relay sender built from the mail config section.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Mailbox,
}

impl SmtpMailSender {
    /// Requires `mail.smtp_host` and `mail.from_address`; credentials are
    /// attached when both username and password are present.
    pub fn new(config: &MailConfig) -> Result<Self, WardenError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| WardenError::Config("mail.smtp_host is required".into()))?;
        let from_address = config
            .from_address
            .as_deref()
            .ok_or_else(|| WardenError::Config("mail.from_address is required".into()))?
            .parse::<Mailbox>()
            .map_err(|e| WardenError::Config(format!("mail.from_address is invalid: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| WardenError::Config(format!("invalid SMTP relay {host}: {e}")))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from_address,
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, subject: &str, body: &str, to_address: &str) -> Result<(), WardenError> {
        let to = to_address.parse::<Mailbox>().map_err(|e| WardenError::Mail {
            message: format!("invalid recipient address {to_address}: {e}"),
            source: None,
        })?;

        let message = Message::builder()
            .from(self.from_address.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| WardenError::Mail {
                message: format!("failed to build message: {e}"),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| WardenError::Mail {
                message: format!("SMTP delivery failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(to = to_address, "verification mail sent");
        Ok(())
    }
}
