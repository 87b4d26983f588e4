// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The teloxide-backed chat transport.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, InputFile, ParseMode};

use timewarden_config::model::TelegramConfig;
use timewarden_core::{ChatTransport, TextFormat, WardenError};

/// Raw message delivery over the Telegram Bot API.
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    /// Requires `telegram.bot_token` to be set and non-empty.
    pub fn new(config: &TelegramConfig) -> Result<Self, WardenError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            WardenError::Config("telegram.bot_token is required for the Telegram transport".into())
        })?;

        if token.is_empty() {
            return Err(WardenError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
        })
    }

    /// The underlying teloxide bot, for the listener.
    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }
}

fn parse_chat_id(chat_id: &str) -> Result<ChatId, WardenError> {
    chat_id
        .parse::<i64>()
        .map(ChatId)
        .map_err(|e| WardenError::Channel {
            message: format!("invalid chat_id: {e}"),
            source: None,
        })
}

fn send_failed(e: teloxide::RequestError) -> WardenError {
    WardenError::Channel {
        message: format!("failed to send message: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        format: TextFormat,
    ) -> Result<(), WardenError> {
        let chat_id = parse_chat_id(chat_id)?;
        let request = self.bot.send_message(chat_id, text);
        let request = match format {
            TextFormat::Plain => request,
            TextFormat::Markdown => request.parse_mode(ParseMode::MarkdownV2),
            TextFormat::Html => request.parse_mode(ParseMode::Html),
        };
        request.await.map_err(send_failed)?;
        Ok(())
    }

    async fn send_typing(&self, chat_id: &str) -> Result<(), WardenError> {
        let chat_id = parse_chat_id(chat_id)?;
        self.bot
            .send_chat_action(chat_id, ChatAction::Typing)
            .await
            .map_err(|e| WardenError::Channel {
                message: format!("failed to send typing indicator: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: &str,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), WardenError> {
        let chat_id = parse_chat_id(chat_id)?;
        let file = InputFile::memory(bytes).file_name(filename.to_string());
        self.bot
            .send_document(chat_id, file)
            .caption(caption)
            .await
            .map_err(send_failed)?;
        Ok(())
    }
}
