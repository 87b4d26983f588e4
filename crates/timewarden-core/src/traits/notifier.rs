// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification surface used by workflows, reporting, and monitoring.
//!
//! One method per user-facing message, so formatting stays out of the engines
//! and tests can assert on which notification fired rather than on markup.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::subscriber::Subscriber;
use crate::types::{ActiveTasksInfo, PendingReviewsInfo, TimeReport, WorkItem};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Plain free-form reply to a chat.
    async fn respond(&self, chat_id: &str, text: &str) -> Result<(), WardenError>;

    /// Typing indicator while a request is processed.
    async fn typing(&self, chat_id: &str) -> Result<(), WardenError>;

    // --- account / verification ---

    async fn request_email(&self, chat_id: &str) -> Result<(), WardenError>;

    async fn incorrect_email(&self, chat_id: &str) -> Result<(), WardenError>;

    async fn email_updated(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    async fn account_verified(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    async fn could_not_verify(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    async fn account_info(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    // --- alerts ---

    async fn no_active_tasks(&self, subscriber: &Subscriber) -> Result<(), WardenError>;

    async fn active_task_outside_of_working_hours(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError>;

    async fn more_than_single_task_is_active(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError>;

    async fn review_reminder(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError>;

    // --- reports ---

    async fn active_tasks(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError>;

    async fn pending_reviews(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError>;

    async fn time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
    ) -> Result<(), WardenError>;

    /// Task-by-task report. Rows where |active - completed| exceeds the
    /// threshold are flagged; `include_summary` appends the totals block.
    async fn detailed_time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
        threshold: f64,
        include_summary: bool,
    ) -> Result<(), WardenError>;

    async fn story_info(
        &self,
        subscriber: &Subscriber,
        item: &WorkItem,
        active_hours: f64,
        parent: Option<&WorkItem>,
    ) -> Result<(), WardenError>;
}
