// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock work-item backend with canned data.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use timewarden_core::{
    ActiveTasksInfo, BacklogAccessor, ChangeEvent, PendingReviewsInfo, TaskInfo, WardenError,
    WorkItem,
};

/// Backend accessor returning data canned at construction.
///
/// Build with the `with_*` methods, then share behind an `Arc`. When
/// `fail_all` is set, every query returns a backlog error, for testing
/// error propagation paths.
#[derive(Default)]
pub struct MockBacklog {
    pub active: Vec<TaskInfo>,
    pub changed_ids: Vec<i64>,
    pub items: Vec<WorkItem>,
    pub change_logs: HashMap<i64, Vec<ChangeEvent>>,
    pub parents: HashMap<i64, WorkItem>,
    pub reviews: PendingReviewsInfo,
    pub fail_all: bool,
}

impl MockBacklog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, tasks: Vec<TaskInfo>) -> Self {
        self.active = tasks;
        self
    }

    pub fn with_items(mut self, items: Vec<WorkItem>) -> Self {
        self.changed_ids = items.iter().map(|i| i.id).collect();
        self.items = items;
        self
    }

    pub fn with_change_log(mut self, item_id: i64, events: Vec<ChangeEvent>) -> Self {
        self.change_logs.insert(item_id, events);
        self
    }

    pub fn with_parent(mut self, child_id: i64, parent: WorkItem) -> Self {
        self.parents.insert(child_id, parent);
        self
    }

    pub fn with_reviews(mut self, reviews: PendingReviewsInfo) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    fn check(&self, user: &str) -> Result<(), WardenError> {
        if self.fail_all {
            Err(WardenError::Backlog {
                user: user.to_string(),
                message: "mock backlog failure".into(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BacklogAccessor for MockBacklog {
    async fn active_items(&self, user_email: &str) -> Result<ActiveTasksInfo, WardenError> {
        self.check(user_email)?;
        Ok(ActiveTasksInfo {
            user: user_email.to_string(),
            tasks: self.active.clone(),
        })
    }

    async fn items_changed_in_period(
        &self,
        user_email: &str,
        _from: NaiveDate,
        _to: Option<NaiveDate>,
    ) -> Result<Vec<i64>, WardenError> {
        self.check(user_email)?;
        Ok(self.changed_ids.clone())
    }

    async fn items_by_id(&self, ids: &[i64]) -> Result<Vec<WorkItem>, WardenError> {
        self.check("")?;
        Ok(self
            .items
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn change_log(&self, item_id: i64) -> Result<Vec<ChangeEvent>, WardenError> {
        self.check("")?;
        Ok(self.change_logs.get(&item_id).cloned().unwrap_or_default())
    }

    async fn parent_of(&self, item_id: i64) -> Result<Option<WorkItem>, WardenError> {
        self.check("")?;
        Ok(self.parents.get(&item_id).cloned())
    }

    async fn pending_reviews(
        &self,
        user_email: &str,
        _project_filters: &[String],
    ) -> Result<PendingReviewsInfo, WardenError> {
        self.check(user_email)?;
        Ok(PendingReviewsInfo {
            user: user_email.to_string(),
            reviews: self.reviews.reviews.clone(),
        })
    }
}
