// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the Timewarden crates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Output formatting hint for outbound chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
    Html,
}

/// A single work-item task, as surfaced by an active-tasks query.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInfo {
    pub id: i64,
    pub title: String,
    /// Elapsed active duration in hours, reconstructed from the change log.
    pub active_hours: f64,
    /// Parent item reference (a lookup result, not an owned link).
    pub parent: Option<ParentRef>,
}

/// Reference to a parent work item: id and title only.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentRef {
    pub id: i64,
    pub title: String,
}

/// Snapshot of a user's currently active tasks.
///
/// Recomputed fresh on every query; never cached across monitoring ticks.
#[derive(Debug, Clone, Default)]
pub struct ActiveTasksInfo {
    pub user: String,
    pub tasks: Vec<TaskInfo>,
}

impl ActiveTasksInfo {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn has_active_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }
}

/// One entry from a work item's audit trail: the moment it changed state.
///
/// Consumed transiently during active-duration reconstruction; never persisted.
/// Events with a missing state label are skipped by the reconstruction.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub timestamp: DateTime<Utc>,
    pub state: Option<String>,
}

/// A full work-item record fetched from the backend.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub state: Option<String>,
    /// Original estimate in hours; absent means 0 for reporting purposes.
    pub estimated: Option<f64>,
    /// Completed work in hours; absent means 0 for reporting purposes.
    pub completed: Option<f64>,
    pub closed_at: Option<DateTime<Utc>>,
    pub changed_at: Option<DateTime<Utc>>,
}

impl WorkItem {
    /// The date a report row is attributed to: the closed timestamp when the
    /// item is closed, otherwise the last-changed timestamp.
    pub fn report_date(&self) -> Option<NaiveDate> {
        self.closed_at
            .or(self.changed_at)
            .map(|t| t.date_naive())
    }
}

/// One row of a time report.
#[derive(Debug, Clone)]
pub struct WorkItemTime {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub estimated: f64,
    pub completed: f64,
    pub active: f64,
}

/// A per-period time report with running totals.
///
/// Built fresh per request and never mutated after construction; accumulation
/// happens only through [`TimeReport::add_item`] while the report is assembled.
#[derive(Debug, Clone)]
pub struct TimeReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    items: Vec<WorkItemTime>,
    pub total_estimated: f64,
    pub total_completed: f64,
    pub total_active: f64,
    /// Business-days x hours-per-day, minus hours off for the period.
    pub expected_hours: f64,
    pub hours_off: f64,
}

impl TimeReport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            items: Vec::new(),
            total_estimated: 0.0,
            total_completed: 0.0,
            total_active: 0.0,
            expected_hours: 0.0,
            hours_off: 0.0,
        }
    }

    /// Add a row and fold it into the running totals.
    pub fn add_item(&mut self, item: WorkItemTime) {
        self.total_estimated += item.estimated;
        self.total_completed += item.completed;
        self.total_active += item.active;
        self.items.push(item);
    }

    pub fn items(&self) -> &[WorkItemTime] {
        &self.items
    }
}

/// A pending code review (pull request) authored by the subscriber.
#[derive(Debug, Clone)]
pub struct ReviewInfo {
    pub id: i64,
    pub title: String,
    pub project: String,
    pub repository: String,
    pub web_url: String,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of a user's pending reviews across the configured projects.
#[derive(Debug, Clone, Default)]
pub struct PendingReviewsInfo {
    pub user: String,
    pub reviews: Vec<ReviewInfo>,
}

impl PendingReviewsInfo {
    pub fn count(&self) -> usize {
        self.reviews.len()
    }

    pub fn has_pending_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }
}

/// A signed time-off ledger entry: hours off on a given date.
///
/// Entries are additive per date; an adjustment that would bring a date to
/// zero or below removes the entry instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffEntry {
    pub date: NaiveDate,
    pub hours_off: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn report_totals_accumulate_per_item() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut report = TimeReport::new(start, start);
        report.add_item(WorkItemTime {
            id: 1,
            title: "fix login".into(),
            date: start,
            estimated: 4.0,
            completed: 3.0,
            active: 2.5,
        });
        report.add_item(WorkItemTime {
            id: 2,
            title: "review".into(),
            date: start,
            estimated: 0.0,
            completed: 1.0,
            active: 1.5,
        });

        assert_eq!(report.total_estimated, 4.0);
        assert_eq!(report.total_completed, 4.0);
        assert_eq!(report.total_active, 4.0);
        assert_eq!(report.items().len(), 2);
    }

    #[test]
    fn report_date_prefers_closed_timestamp() {
        let closed = Utc.with_ymd_and_hms(2026, 3, 4, 18, 0, 0).unwrap();
        let changed = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let item = WorkItem {
            id: 7,
            title: "done".into(),
            state: Some("Closed".into()),
            estimated: None,
            completed: None,
            closed_at: Some(closed),
            changed_at: Some(changed),
        };
        assert_eq!(item.report_date(), Some(closed.date_naive()));

        let open = WorkItem {
            closed_at: None,
            ..item
        };
        assert_eq!(open.report_date(), Some(changed.date_naive()));
    }

    #[test]
    fn active_tasks_info_derives_count() {
        let mut info = ActiveTasksInfo {
            user: "dev@example.com".into(),
            tasks: vec![],
        };
        assert!(!info.has_active_tasks());

        info.tasks.push(TaskInfo {
            id: 1,
            title: "t".into(),
            active_hours: 0.0,
            parent: None,
        });
        assert!(info.has_active_tasks());
        assert_eq!(info.count(), 1);
    }
}
