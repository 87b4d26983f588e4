// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for messaging platform integrations (Telegram, etc.).

use async_trait::async_trait;

use crate::error::WardenError;
use crate::types::TextFormat;

/// Low-level message delivery to a chat session.
///
/// Transports carry raw text and documents only; message composition lives
/// in the notifier layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        format: TextFormat,
    ) -> Result<(), WardenError>;

    /// Shows a "typing" indicator in the given chat.
    async fn send_typing(&self, chat_id: &str) -> Result<(), WardenError>;

    /// Sends a document attachment to the given chat.
    async fn send_document(
        &self,
        chat_id: &str,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), WardenError>;
}
