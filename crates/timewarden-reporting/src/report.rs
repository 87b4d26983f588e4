// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expected-hours and hours-off arithmetic shared by every report.

use chrono::NaiveDate;

use timewarden_core::TimeOffEntry;

use crate::calendar::business_days;

/// Hours off relevant to a report: the sum of all ledger entries dated on or
/// after the report's start date.
pub fn hours_off_since(entries: &[TimeOffEntry], start: NaiveDate) -> i32 {
    entries
        .iter()
        .filter(|e| e.date >= start)
        .map(|e| e.hours_off)
        .sum()
}

/// Expected working hours for a period: business days times the target
/// hours-per-day, minus hours off.
pub fn expected_hours(start: NaiveDate, end: NaiveDate, hours_per_day: u32, hours_off: i32) -> f64 {
    business_days(start, end) * f64::from(hours_per_day) - f64::from(hours_off)
}
