// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier that records every notification for assertion in tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use timewarden_core::{
    ActiveTasksInfo, Notifier, PendingReviewsInfo, Subscriber, TimeReport, WardenError, WorkItem,
};

/// One recorded notification: which method fired, for which chat, and any
/// free-form text that went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub method: &'static str,
    pub chat_id: String,
    pub text: String,
}

/// Captures notifications instead of delivering them.
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<SentNotification>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().await.clone()
    }

    /// Methods fired, in order.
    pub async fn methods(&self) -> Vec<&'static str> {
        self.sent.lock().await.iter().map(|n| n.method).collect()
    }

    /// Free-form `respond` texts only, in order.
    pub async fn responses(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|n| n.method == "respond")
            .map(|n| n.text.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }

    async fn record(&self, method: &'static str, chat_id: &str, text: impl Into<String>) {
        self.sent.lock().await.push(SentNotification {
            method,
            chat_id: chat_id.to_string(),
            text: text.into(),
        });
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn respond(&self, chat_id: &str, text: &str) -> Result<(), WardenError> {
        self.record("respond", chat_id, text).await;
        Ok(())
    }

    async fn typing(&self, chat_id: &str) -> Result<(), WardenError> {
        self.record("typing", chat_id, "").await;
        Ok(())
    }

    async fn request_email(&self, chat_id: &str) -> Result<(), WardenError> {
        self.record("request_email", chat_id, "").await;
        Ok(())
    }

    async fn incorrect_email(&self, chat_id: &str) -> Result<(), WardenError> {
        self.record("incorrect_email", chat_id, "").await;
        Ok(())
    }

    async fn email_updated(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.record("email_updated", &subscriber.chat_id, subscriber.email.clone())
            .await;
        Ok(())
    }

    async fn account_verified(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.record("account_verified", &subscriber.chat_id, "").await;
        Ok(())
    }

    async fn could_not_verify(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.record("could_not_verify", &subscriber.chat_id, "").await;
        Ok(())
    }

    async fn account_info(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.record("account_info", &subscriber.chat_id, "").await;
        Ok(())
    }

    async fn no_active_tasks(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.record("no_active_tasks", &subscriber.chat_id, "").await;
        Ok(())
    }

    async fn active_task_outside_of_working_hours(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        self.record(
            "active_task_outside_of_working_hours",
            &subscriber.chat_id,
            format!("{} tasks", info.count()),
        )
        .await;
        Ok(())
    }

    async fn more_than_single_task_is_active(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        self.record(
            "more_than_single_task_is_active",
            &subscriber.chat_id,
            format!("{} tasks", info.count()),
        )
        .await;
        Ok(())
    }

    async fn review_reminder(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError> {
        self.record(
            "review_reminder",
            &subscriber.chat_id,
            format!("{} reviews", info.count()),
        )
        .await;
        Ok(())
    }

    async fn active_tasks(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        self.record(
            "active_tasks",
            &subscriber.chat_id,
            format!("{} tasks", info.count()),
        )
        .await;
        Ok(())
    }

    async fn pending_reviews(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError> {
        self.record(
            "pending_reviews",
            &subscriber.chat_id,
            format!("{} reviews", info.count()),
        )
        .await;
        Ok(())
    }

    async fn time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
    ) -> Result<(), WardenError> {
        self.record(
            "time_report",
            &subscriber.chat_id,
            format!(
                "active={:.2} expected={:.2}",
                report.total_active, report.expected_hours
            ),
        )
        .await;
        Ok(())
    }

    async fn detailed_time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
        threshold: f64,
        include_summary: bool,
    ) -> Result<(), WardenError> {
        self.record(
            "detailed_time_report",
            &subscriber.chat_id,
            format!(
                "rows={} threshold={threshold} summary={include_summary}",
                report.items().len()
            ),
        )
        .await;
        Ok(())
    }

    async fn story_info(
        &self,
        subscriber: &Subscriber,
        item: &WorkItem,
        active_hours: f64,
        _parent: Option<&WorkItem>,
    ) -> Result<(), WardenError> {
        self.record(
            "story_info",
            &subscriber.chat_id,
            format!("#{} active={active_hours:.2}", item.id),
        )
        .await;
        Ok(())
    }
}
