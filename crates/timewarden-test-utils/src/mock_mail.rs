// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock mail sender capturing outgoing verification mail.

use async_trait::async_trait;
use tokio::sync::Mutex;

use timewarden_core::{MailSender, WardenError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
    pub to_address: String,
}

/// Captures messages instead of delivering them.
#[derive(Default)]
pub struct MockMailSender {
    sent: Mutex<Vec<SentMail>>,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send(
        &self,
        subject: &str,
        body: &str,
        to_address: &str,
    ) -> Result<(), WardenError> {
        self.sent.lock().await.push(SentMail {
            subject: subject.to_string(),
            body: body.to_string(),
            to_address: to_address.to_string(),
        });
        Ok(())
    }
}
