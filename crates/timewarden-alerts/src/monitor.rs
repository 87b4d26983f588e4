// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background monitoring sweep.
//!
//! On every tick the [`MonitoringService`] walks all subscribers, takes a
//! fresh backend snapshot for each, evaluates the alert rules, delivers the
//! due alerts, and persists the updated alert timestamps. A failure for one
//! subscriber is logged and never stops the sweep.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use timewarden_core::{
    BacklogAccessor, Notifier, PendingReviewsInfo, Subscriber, SubscriberStore, WardenError,
};
use timewarden_reporting::ReportingService;

use crate::cooldown::{evaluate, AlertKind};

pub struct MonitoringService {
    notifier: Arc<dyn Notifier>,
    backlog: Arc<dyn BacklogAccessor>,
    reporting: Arc<ReportingService>,
    store: Arc<dyn SubscriberStore>,
}

impl MonitoringService {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        backlog: Arc<dyn BacklogAccessor>,
        reporting: Arc<ReportingService>,
        store: Arc<dyn SubscriberStore>,
    ) -> Self {
        Self {
            notifier,
            backlog,
            reporting,
            store,
        }
    }

    /// Run the sweep on a fixed interval until cancelled.
    pub async fn run(&self, interval_minutes: u64, shutdown: CancellationToken) {
        let period = std::time::Duration::from_secs(interval_minutes * 60);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(interval_minutes, "monitoring loop started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("monitoring loop stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.sweep().await;
                }
            }
        }
    }

    /// One pass over all subscribers.
    pub async fn sweep(&self) {
        let subscribers = match self.store.list_all().await {
            Ok(all) => all,
            Err(error) => {
                warn!(%error, "could not list subscribers, skipping sweep");
                return;
            }
        };

        debug!(count = subscribers.len(), "monitoring sweep");
        for mut subscriber in subscribers {
            if let Err(error) = self.check_subscriber(&mut subscriber).await {
                warn!(chat_id = %subscriber.chat_id, %error, "subscriber check failed");
            }
        }
    }

    /// Evaluate and deliver alerts for one subscriber, persisting any
    /// timestamp updates.
    async fn check_subscriber(&self, subscriber: &mut Subscriber) -> Result<(), WardenError> {
        // Alerts only make sense against a configured working-hours window.
        if !subscriber.is_verified || subscriber.working_hours.is_none() {
            return Ok(());
        }

        let now = Utc::now();
        let active = self
            .reporting
            .active_tasks_snapshot(&subscriber.email)
            .await?;

        let reviews = if subscriber.project_filters.is_empty() {
            PendingReviewsInfo {
                user: subscriber.email.clone(),
                reviews: Vec::new(),
            }
        } else {
            self.backlog
                .pending_reviews(&subscriber.email, &subscriber.project_filters)
                .await?
        };

        let due = evaluate(now, subscriber, active.count(), reviews.count());
        if due.is_empty() {
            return Ok(());
        }

        info!(chat_id = %subscriber.chat_id, alerts = ?due, "delivering alerts");
        for kind in &due {
            match kind {
                AlertKind::NoActiveTask => {
                    self.notifier.no_active_tasks(subscriber).await?;
                    subscriber.alerts.no_active_task = Some(now);
                }
                AlertKind::ActiveOutsideHours => {
                    self.notifier
                        .active_task_outside_of_working_hours(subscriber, &active)
                        .await?;
                    subscriber.alerts.outside_hours = Some(now);
                }
                AlertKind::ConcurrentTasks => {
                    self.notifier
                        .more_than_single_task_is_active(subscriber, &active)
                        .await?;
                    subscriber.alerts.concurrent_tasks = Some(now);
                }
                AlertKind::ReviewSlotOne => {
                    self.notifier.review_reminder(subscriber, &reviews).await?;
                    subscriber.alerts.review_slot_one = Some(now);
                }
                AlertKind::ReviewSlotTwo => {
                    self.notifier.review_reminder(subscriber, &reviews).await?;
                    subscriber.alerts.review_slot_two = Some(now);
                }
            }
        }

        self.store.upsert(subscriber).await
    }
}
