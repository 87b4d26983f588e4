// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Out-of-band mail delivery trait (verification codes).

use async_trait::async_trait;

use crate::error::WardenError;

#[async_trait]
pub trait MailSender: Send + Sync {
    /// Sends a plain-text message to the given address.
    async fn send(&self, subject: &str, body: &str, to_address: &str)
        -> Result<(), WardenError>;
}
