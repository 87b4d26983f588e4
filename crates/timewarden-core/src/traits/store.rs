// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent subscriber store trait.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::subscriber::Subscriber;

/// Persistence for [`Subscriber`] aggregates.
///
/// The design assumes a single writer per subscriber at a time; there is no
/// optimistic-concurrency token on the record.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn get_by_id(&self, chat_id: &str) -> Result<Option<Subscriber>, WardenError>;

    async fn upsert(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    async fn list_all(&self) -> Result<Vec<Subscriber>, WardenError>;

    async fn delete(&self, chat_id: &str) -> Result<(), WardenError>;
}
