// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-accounting engine: business-day math, active-interval
//! reconstruction, and the service that turns backend data into reports.

pub mod active_time;
pub mod calendar;
pub mod report;
pub mod service;

pub use active_time::{active_duration, active_hours, ACTIVE_STATE};
pub use calendar::{
    business_days, is_weekend, month_range, parse_month, parse_report_date, parse_time_off_date,
    previous_workday, start_of_month, start_of_week, start_of_year,
};
pub use report::{expected_hours, hours_off_since};
pub use service::ReportingService;
