// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure alert evaluation: given a subscriber's state and a fresh snapshot of
//! the backend, decide which alerts are due right now.
//!
//! All pacing lives here. Behaviour alerts repeat on a fixed cooldown; review
//! reminders fire in two fixed one-hour slots per working day, at most once
//! per slot.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use timewarden_core::Subscriber;

/// Minimum spacing between repeats of the same behaviour alert.
pub const ALERT_COOLDOWN_MINUTES: i64 = 30;

/// Offset of the second review-reminder slot from the start of working hours.
pub const SECOND_REVIEW_SLOT_OFFSET_HOURS: i64 = 4;

/// An alert the monitoring sweep should deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Inside working hours on a weekday, but nothing is active.
    NoActiveTask,
    /// A task is active outside the working-hours window or on a weekend.
    ActiveOutsideHours,
    /// More than one task is active at once.
    ConcurrentTasks,
    /// Pending reviews, first daily slot.
    ReviewSlotOne,
    /// Pending reviews, second daily slot.
    ReviewSlotTwo,
}

/// Evaluate all alert rules for one subscriber.
///
/// Returns the alerts due at `now`, in a fixed order. Unverified or snoozed
/// subscribers, and subscribers without a working-hours window, never alert.
pub fn evaluate(
    now: DateTime<Utc>,
    subscriber: &Subscriber,
    active_count: usize,
    pending_review_count: usize,
) -> Vec<AlertKind> {
    let mut due = Vec::new();

    if !subscriber.is_verified || subscriber.is_snoozed(now) {
        return due;
    }
    let Some(hours) = &subscriber.working_hours else {
        return due;
    };

    let time = now.time();
    let inside = hours.contains(time);
    let weekday = !matches!(now.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
    let alerts = &subscriber.alerts;

    if active_count == 0 && inside && weekday && cooled_down(now, alerts.no_active_task) {
        due.push(AlertKind::NoActiveTask);
    }
    if active_count > 0 && (!inside || !weekday) && cooled_down(now, alerts.outside_hours) {
        due.push(AlertKind::ActiveOutsideHours);
    }
    if active_count > 1 && cooled_down(now, alerts.concurrent_tasks) {
        due.push(AlertKind::ConcurrentTasks);
    }

    // Review reminders only make sense with a project scope to search in,
    // and only on working days.
    if weekday && !subscriber.project_filters.is_empty() && pending_review_count > 0 {
        if in_slot(time, hours.start, 0) && !fired_today(now, alerts.review_slot_one) {
            due.push(AlertKind::ReviewSlotOne);
        }
        if in_slot(time, hours.start, SECOND_REVIEW_SLOT_OFFSET_HOURS)
            && !fired_today(now, alerts.review_slot_two)
        {
            due.push(AlertKind::ReviewSlotTwo);
        }
    }

    due
}

fn cooled_down(now: DateTime<Utc>, last: Option<DateTime<Utc>>) -> bool {
    match last {
        None => true,
        Some(ts) => now - ts >= Duration::minutes(ALERT_COOLDOWN_MINUTES),
    }
}

/// One-hour slot starting `offset_hours` after the working-hours start.
fn in_slot(time: NaiveTime, window_start: NaiveTime, offset_hours: i64) -> bool {
    let slot_start = window_start
        .overflowing_add_signed(Duration::hours(offset_hours))
        .0;
    let slot_end = slot_start.overflowing_add_signed(Duration::hours(1)).0;
    time >= slot_start && time < slot_end
}

fn fired_today(now: DateTime<Utc>, last: Option<DateTime<Utc>>) -> bool {
    last.is_some_and(|ts| ts.date_naive() == now.date_naive())
}
