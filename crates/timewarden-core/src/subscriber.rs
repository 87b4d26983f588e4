// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The subscriber aggregate: identity, verification state, preferences, and
//! the currently active conversational workflow.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::TimeOffEntry;

/// Fixed workflow time-to-live from creation.
pub const WORKFLOW_TTL_MINUTES: i64 = 5;

/// Default target working hours per day.
pub const DEFAULT_HOURS_PER_DAY: u32 = 8;

/// The closed set of conversational workflows.
///
/// Dispatch is a match on this tag plus the step index; no runtime type
/// resolution is involved, so the workflow slot serializes as plain data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum WorkflowKind {
    Account,
    Settings,
    Snooze,
    TimeOff,
    Delete,
    Info,
    ActiveTasks,
    PullRequests,
    Standup,
    Day,
    Week,
    Month,
    Year,
    Healthcheck,
    StoryInfo,
}

/// Outcome of a single workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowResult {
    /// The workflow expects further input; keep it in the subscriber's slot.
    Continue,
    /// The workflow is done; the router clears the slot.
    Finished,
}

/// A resumable, per-subscriber workflow instance.
///
/// Carries the step index, a small opaque payload for passing a value between
/// two steps, and a fixed expiration timestamp set at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub kind: WorkflowKind,
    pub step: u32,
    /// Opaque side payload, e.g. the setting name between the prompt and the
    /// answer steps of the settings flow.
    #[serde(default)]
    pub data: String,
    pub expires_at: DateTime<Utc>,
}

impl Workflow {
    pub fn new(kind: WorkflowKind, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            step: 0,
            data: String::new(),
            expires_at: now + Duration::minutes(WORKFLOW_TTL_MINUTES),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// The subscriber's working-hours window, as UTC time-of-day offsets.
///
/// Invariant (enforced at parse time): `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    /// Whether a UTC time-of-day falls strictly inside the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time > self.start && time < self.end
    }
}

/// Last-fired timestamps, one per alert kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertTimestamps {
    pub no_active_task: Option<DateTime<Utc>>,
    pub outside_hours: Option<DateTime<Utc>>,
    pub concurrent_tasks: Option<DateTime<Utc>>,
    pub review_slot_one: Option<DateTime<Utc>>,
    pub review_slot_two: Option<DateTime<Utc>>,
}

/// The aggregate root for one end user / chat.
///
/// Created on first contact (unverified, seeded with the account workflow)
/// and updated in place thereafter; deleted only through the confirmed
/// delete workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Opaque chat/session id from the transport.
    pub chat_id: String,
    /// Work email driving all backend queries. Empty until set.
    pub email: String,
    pub is_verified: bool,
    /// One-time verification code delivered out-of-band.
    pub pin: u32,
    /// Resets to 0 on successful verification.
    pub verification_attempts: u32,
    /// `None` disables working-hours monitoring for this subscriber.
    pub working_hours: Option<WorkingHours>,
    pub hours_per_day: u32,
    /// Project-name filters for review queries. Empty means not configured.
    #[serde(default)]
    pub project_filters: Vec<String>,
    /// At most one active workflow at a time.
    #[serde(default)]
    pub active_workflow: Option<Workflow>,
    #[serde(default)]
    pub snooze_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_off: Vec<TimeOffEntry>,
    #[serde(default)]
    pub alerts: AlertTimestamps,
}

impl Subscriber {
    /// A fresh, unverified subscriber for the given chat.
    pub fn new(chat_id: impl Into<String>, pin: u32) -> Self {
        Self {
            chat_id: chat_id.into(),
            email: String::new(),
            is_verified: false,
            pin,
            verification_attempts: 0,
            working_hours: None,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            project_filters: Vec::new(),
            active_workflow: None,
            snooze_until: None,
            time_off: Vec::new(),
            alerts: AlertTimestamps::default(),
        }
    }

    /// Effective hours-per-day, falling back to the system default when the
    /// stored value is zero (legacy rows).
    pub fn effective_hours_per_day(&self) -> u32 {
        if self.hours_per_day == 0 {
            DEFAULT_HOURS_PER_DAY
        } else {
            self.hours_per_day
        }
    }

    /// Whether all alerting is currently snoozed.
    pub fn is_snoozed(&self, now: DateTime<Utc>) -> bool {
        self.snooze_until.is_some_and(|until| now < until)
    }

    /// Apply a signed time-off adjustment for a date.
    ///
    /// Positive deltas add or accumulate. Negative deltas subtract; when the
    /// balance would drop to zero or below, the entry is removed entirely.
    /// Returns the remaining hours for the date, if any.
    ///
    /// The balance is computed in `i64` so extreme user-supplied deltas
    /// (either sign) cannot overflow; it saturates at `i32::MAX`.
    pub fn adjust_time_off(&mut self, date: chrono::NaiveDate, hours: i32) -> Option<i32> {
        match self.time_off.iter_mut().position(|e| e.date == date) {
            Some(idx) => {
                let balance = i64::from(self.time_off[idx].hours_off) + i64::from(hours);
                if balance <= 0 {
                    self.time_off.remove(idx);
                    None
                } else {
                    let clamped = balance.min(i64::from(i32::MAX)) as i32;
                    self.time_off[idx].hours_off = clamped;
                    Some(clamped)
                }
            }
            None => {
                if hours >= 0 {
                    self.time_off.push(TimeOffEntry {
                        date,
                        hours_off: hours,
                    });
                    Some(hours)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn workflow_expires_after_ttl() {
        let created = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        let wf = Workflow::new(WorkflowKind::Settings, created);

        assert!(!wf.is_expired(created + Duration::minutes(4)));
        assert!(wf.is_expired(created + Duration::minutes(6)));
    }

    #[test]
    fn working_hours_window_is_exclusive() {
        let hours = WorkingHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        };
        assert!(hours.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(!hours.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(!hours.contains(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(!hours.contains(NaiveTime::from_hms_opt(20, 30, 0).unwrap()));
    }

    #[test]
    fn time_off_accumulates_and_nets_out() {
        let mut sub = Subscriber::new("42", 1234);
        let d = date(2026, 3, 5);

        assert_eq!(sub.adjust_time_off(d, 8), Some(8));
        assert_eq!(sub.adjust_time_off(d, -3), Some(5));
        assert_eq!(sub.time_off.len(), 1);
        assert_eq!(sub.time_off[0].hours_off, 5);
    }

    #[test]
    fn time_off_entry_removed_at_or_below_zero() {
        let mut sub = Subscriber::new("42", 1234);
        let d = date(2026, 3, 5);

        sub.adjust_time_off(d, 4);
        assert_eq!(sub.adjust_time_off(d, -6), None);
        assert!(sub.time_off.is_empty());
    }

    #[test]
    fn extreme_negative_delta_clears_the_entry() {
        let mut sub = Subscriber::new("42", 1234);
        let d = date(2026, 3, 5);

        sub.adjust_time_off(d, 8);
        assert_eq!(sub.adjust_time_off(d, i32::MIN), None);
        assert!(sub.time_off.is_empty());
    }

    #[test]
    fn balance_saturates_instead_of_overflowing() {
        let mut sub = Subscriber::new("42", 1234);
        let d = date(2026, 3, 5);

        sub.adjust_time_off(d, i32::MAX);
        assert_eq!(sub.adjust_time_off(d, i32::MAX), Some(i32::MAX));
        assert_eq!(sub.time_off[0].hours_off, i32::MAX);
    }

    #[test]
    fn negative_delta_without_entry_is_a_no_op() {
        let mut sub = Subscriber::new("42", 1234);
        assert_eq!(sub.adjust_time_off(date(2026, 3, 5), -2), None);
        assert!(sub.time_off.is_empty());
    }

    #[test]
    fn snooze_gate_respects_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        let mut sub = Subscriber::new("42", 1234);
        assert!(!sub.is_snoozed(now));

        sub.snooze_until = Some(now + Duration::minutes(30));
        assert!(sub.is_snoozed(now));
        assert!(!sub.is_snoozed(now + Duration::minutes(31)));
    }

    #[test]
    fn subscriber_roundtrips_through_json() {
        let mut sub = Subscriber::new("42", 9876);
        sub.email = "dev@example.com".into();
        sub.active_workflow = Some(Workflow::new(
            WorkflowKind::Account,
            Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap(),
        ));
        sub.time_off.push(TimeOffEntry {
            date: date(2026, 3, 6),
            hours_off: 8,
        });

        let json = serde_json::to_string(&sub).unwrap();
        let back: Subscriber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }
}
