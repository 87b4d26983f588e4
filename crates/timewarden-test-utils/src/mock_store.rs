// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory subscriber store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use timewarden_core::{Subscriber, SubscriberStore, WardenError};

/// HashMap-backed store for router and monitoring tests.
#[derive(Default)]
pub struct MemorySubscriberStore {
    subscribers: Mutex<HashMap<String, Subscriber>>,
}

impl MemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing subscriber.
    pub async fn insert(&self, subscriber: Subscriber) {
        self.subscribers
            .lock()
            .await
            .insert(subscriber.chat_id.clone(), subscriber);
    }

    pub async fn len(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.subscribers.lock().await.is_empty()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn get_by_id(&self, chat_id: &str) -> Result<Option<Subscriber>, WardenError> {
        Ok(self.subscribers.lock().await.get(chat_id).cloned())
    }

    async fn upsert(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.subscribers
            .lock()
            .await
            .insert(subscriber.chat_id.clone(), subscriber.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Subscriber>, WardenError> {
        let mut all: Vec<Subscriber> = self.subscribers.lock().await.values().cloned().collect();
        all.sort_by(|a, b| a.chat_id.cmp(&b.chat_id));
        Ok(all)
    }

    async fn delete(&self, chat_id: &str) -> Result<(), WardenError> {
        self.subscribers.lock().await.remove(chat_id);
        Ok(())
    }
}
