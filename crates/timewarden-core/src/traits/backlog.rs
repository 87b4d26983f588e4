// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Work-item backend accessor trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::WardenError;
use crate::types::{ActiveTasksInfo, ChangeEvent, PendingReviewsInfo, WorkItem};

/// Read-only access to the remote work-item backend.
///
/// All queries are keyed by the subscriber's work email. Implementations wrap
/// transport failures in [`WardenError::Backlog`] with the user attached.
#[async_trait]
pub trait BacklogAccessor: Send + Sync {
    /// Items currently in the active state for the user (ids and titles only;
    /// durations are attached separately by the caller).
    async fn active_items(&self, user_email: &str) -> Result<ActiveTasksInfo, WardenError>;

    /// Ids of items the user changed within the period. An open end means
    /// "until now".
    async fn items_changed_in_period(
        &self,
        user_email: &str,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<Vec<i64>, WardenError>;

    /// Full records for the given ids.
    async fn items_by_id(&self, ids: &[i64]) -> Result<Vec<WorkItem>, WardenError>;

    /// The item's state-change audit trail, chronologically ordered.
    async fn change_log(&self, item_id: i64) -> Result<Vec<ChangeEvent>, WardenError>;

    /// The item's parent, if any. A lookup result, not an owned link.
    async fn parent_of(&self, item_id: i64) -> Result<Option<WorkItem>, WardenError>;

    /// Reviews (pull requests) authored by the user across the given projects.
    async fn pending_reviews(
        &self,
        user_email: &str,
        project_filters: &[String],
    ) -> Result<PendingReviewsInfo, WardenError>;
}
