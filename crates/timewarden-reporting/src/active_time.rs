// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Active-interval reconstruction from a work item's change log.
//!
//! The backend's audit trail is a sparse, chronologically-ordered list of
//! state transitions. Elapsed active time is rebuilt in a single scan: an
//! interval opens on entry to the active state and closes on the first
//! transition away from it; an interval still open at the end of the log
//! (the item is active right now) is closed against the current time.

use chrono::{DateTime, Duration, Utc};

use timewarden_core::ChangeEvent;

/// The backend state label that counts as "actively being worked on".
pub const ACTIVE_STATE: &str = "Active";

/// Total elapsed active duration for one item.
///
/// Repeated consecutive transitions into the active state do not reset the
/// open interval. Events with a missing state label are skipped. The result
/// is never negative.
pub fn active_duration(events: &[ChangeEvent], now: DateTime<Utc>) -> Duration {
    let mut total = Duration::zero();
    let mut open_start: Option<DateTime<Utc>> = None;

    for event in events {
        let Some(state) = event.state.as_deref() else {
            continue;
        };

        if state == ACTIVE_STATE {
            if open_start.is_none() {
                open_start = Some(event.timestamp);
            }
        } else if let Some(start) = open_start.take() {
            total += event.timestamp - start;
        }
    }

    // Still-open interval: the item is active right now.
    if let Some(start) = open_start {
        total += now - start;
    }

    if total < Duration::zero() {
        Duration::zero()
    } else {
        total
    }
}

/// [`active_duration`] expressed in fractional hours.
pub fn active_hours(events: &[ChangeEvent], now: DateTime<Utc>) -> f64 {
    active_duration(events, now).num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, h, m, 0).unwrap()
    }

    fn event(h: u32, m: u32, state: &str) -> ChangeEvent {
        ChangeEvent {
            timestamp: ts(h, m),
            state: Some(state.to_string()),
        }
    }

    #[test]
    fn single_active_closed_pair_returns_exact_span() {
        let events = vec![event(9, 0, "Active"), event(11, 30, "Closed")];
        let duration = active_duration(&events, ts(23, 0));
        assert_eq!(duration, Duration::minutes(150));
    }

    #[test]
    fn unterminated_interval_runs_until_now() {
        let events = vec![event(14, 0, "Active")];
        let now = ts(16, 45);
        assert_eq!(active_duration(&events, now), Duration::minutes(165));
    }

    #[test]
    fn repeated_active_events_do_not_reset_the_open_interval() {
        let events = vec![
            event(9, 0, "Active"),
            event(10, 0, "Active"),
            event(11, 0, "Closed"),
        ];
        // 9:00-11:00, not 10:00-11:00 and not double-counted.
        assert_eq!(active_duration(&events, ts(23, 0)), Duration::hours(2));
    }

    #[test]
    fn multiple_intervals_accumulate() {
        let events = vec![
            event(9, 0, "Active"),
            event(10, 0, "Resolved"),
            event(13, 0, "Active"),
            event(14, 30, "Closed"),
        ];
        assert_eq!(active_duration(&events, ts(23, 0)), Duration::minutes(150));
    }

    #[test]
    fn never_active_item_yields_zero() {
        let events = vec![event(9, 0, "New"), event(10, 0, "Closed")];
        assert_eq!(active_duration(&events, ts(23, 0)), Duration::zero());
        assert_eq!(active_duration(&[], ts(23, 0)), Duration::zero());
    }

    #[test]
    fn events_without_state_are_skipped() {
        let events = vec![
            event(9, 0, "Active"),
            ChangeEvent {
                timestamp: ts(9, 30),
                state: None,
            },
            event(10, 0, "Closed"),
        ];
        assert_eq!(active_duration(&events, ts(23, 0)), Duration::hours(1));
    }

    #[test]
    fn active_hours_converts_to_fractional_hours() {
        let events = vec![event(9, 0, "Active"), event(9, 45, "Closed")];
        let hours = active_hours(&events, ts(23, 0));
        assert!((hours - 0.75).abs() < f64::EPSILON);
    }
}
