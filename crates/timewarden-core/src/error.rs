// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Timewarden bot.

use thiserror::Error;

/// The primary error type used across all Timewarden collaborator traits
/// and core operations.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (delivery failure, message format, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Work-item backend errors, annotated with the user the query ran for.
    #[error("backlog query for {user} failed: {message}")]
    Backlog {
        user: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Out-of-band mail delivery errors.
    #[error("mail delivery failed: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The router found no workflow accepting an inbound command. This is a
    /// missing command mapping, not a user error, and must surface loudly.
    #[error("no workflow accepts input for chat '{chat_id}'")]
    UnroutableCommand { chat_id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
