// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report orchestration: fetch from the backlog, run the time-accounting
//! math, hand the result to the notifier.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use timewarden_core::{
    ActiveTasksInfo, BacklogAccessor, Notifier, ParentRef, Subscriber, TimeReport, WardenError,
    WorkItemTime,
};

use crate::active_time::active_hours;
use crate::calendar::previous_workday;
use crate::report::{expected_hours, hours_off_since};

/// Builds and delivers every report the bot offers.
///
/// Owns no state beyond its collaborators; every report is computed fresh
/// from backend data at request time.
pub struct ReportingService {
    notifier: Arc<dyn Notifier>,
    backlog: Arc<dyn BacklogAccessor>,
}

impl ReportingService {
    pub fn new(notifier: Arc<dyn Notifier>, backlog: Arc<dyn BacklogAccessor>) -> Self {
        Self { notifier, backlog }
    }

    /// Summary work-hours report for a period (`/day`, `/week`, `/month`, `/year`).
    pub async fn work_hours_report(
        &self,
        subscriber: &Subscriber,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<(), WardenError> {
        let report = self.time_report(subscriber, start, end).await?;

        info!(
            total_active = report.total_active,
            total_estimated = report.total_estimated,
            total_completed = report.total_completed,
            expected = report.expected_hours,
            "work hours report built"
        );

        self.notifier.time_report(subscriber, &report).await
    }

    /// Detailed per-task report flagging rows whose active/completed gap
    /// exceeds the threshold (`/healthcheck`).
    pub async fn healthcheck_report(
        &self,
        subscriber: &Subscriber,
        start: NaiveDate,
        threshold: f64,
    ) -> Result<(), WardenError> {
        let report = self.time_report(subscriber, start, None).await?;
        self.notifier
            .detailed_time_report(subscriber, &report, threshold, true)
            .await
    }

    /// Tasks of the previous work day, without the totals block (`/standup`).
    pub async fn standup_report(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        let start = previous_workday(Utc::now().date_naive());
        let report = self.time_report(subscriber, start, None).await?;
        self.notifier
            .detailed_time_report(subscriber, &report, 0.0, false)
            .await
    }

    /// Current active tasks with reconstructed durations (`/active`).
    pub async fn active_tasks_report(
        &self,
        subscriber: &Subscriber,
    ) -> Result<ActiveTasksInfo, WardenError> {
        let info = self.active_tasks_snapshot(&subscriber.email).await?;
        self.notifier.active_tasks(subscriber, &info).await?;
        Ok(info)
    }

    /// Fresh active-tasks query with active durations and parent references
    /// attached. Also the per-tick input of the monitoring loop; never cached.
    pub async fn active_tasks_snapshot(
        &self,
        user_email: &str,
    ) -> Result<ActiveTasksInfo, WardenError> {
        let mut info = self.backlog.active_items(user_email).await?;
        let now = Utc::now();

        for task in &mut info.tasks {
            let log = self.backlog.change_log(task.id).await?;
            task.active_hours = active_hours(&log, now);
            task.parent = self.backlog.parent_of(task.id).await?.map(|p| ParentRef {
                id: p.id,
                title: p.title,
            });
        }

        Ok(info)
    }

    /// Pending reviews across the subscriber's configured projects (`/pr`).
    pub async fn pending_reviews_report(
        &self,
        subscriber: &Subscriber,
    ) -> Result<(), WardenError> {
        let info = self
            .backlog
            .pending_reviews(&subscriber.email, &subscriber.project_filters)
            .await?;
        self.notifier.pending_reviews(subscriber, &info).await
    }

    /// Single work-item summary with its reconstructed active time (`/storyinfo`).
    pub async fn story_info_report(
        &self,
        subscriber: &Subscriber,
        item_id: i64,
    ) -> Result<(), WardenError> {
        let items = self.backlog.items_by_id(&[item_id]).await?;
        let Some(item) = items.into_iter().next() else {
            return self
                .notifier
                .respond(
                    &subscriber.chat_id,
                    &format!("Work item {item_id} was not found."),
                )
                .await;
        };

        let log = self.backlog.change_log(item.id).await?;
        let hours = active_hours(&log, Utc::now());
        let parent = self.backlog.parent_of(item.id).await?;

        self.notifier
            .story_info(subscriber, &item, hours, parent.as_ref())
            .await
    }

    /// Assemble a [`TimeReport`] for the period. An open end date means
    /// "until today".
    async fn time_report(
        &self,
        subscriber: &Subscriber,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TimeReport, WardenError> {
        let now = Utc::now();
        let end = end.unwrap_or_else(|| now.date_naive());

        let ids = self
            .backlog
            .items_changed_in_period(&subscriber.email, start, Some(end))
            .await?;
        let items = self.backlog.items_by_id(&ids).await?;

        let mut report = TimeReport::new(start, end);
        for item in items {
            let Some(date) = item.report_date() else {
                warn!(item_id = item.id, "work item has no usable date, skipping");
                continue;
            };

            let log = self.backlog.change_log(item.id).await?;
            let row = WorkItemTime {
                id: item.id,
                title: item.title.clone(),
                date,
                estimated: item.estimated.unwrap_or(0.0),
                completed: item.completed.unwrap_or(0.0),
                active: active_hours(&log, now),
            };
            info!(
                title = %row.title,
                estimated = row.estimated,
                completed = row.completed,
                active = row.active,
                "report row"
            );
            report.add_item(row);
        }

        let hours_off = hours_off_since(&subscriber.time_off, start);
        report.hours_off = f64::from(hours_off);
        report.expected_hours = expected_hours(
            start,
            end,
            subscriber.effective_hours_per_day(),
            hours_off,
        );

        Ok(report)
    }
}
