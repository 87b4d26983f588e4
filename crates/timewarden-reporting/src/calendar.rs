// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business-day arithmetic and report date-range helpers.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Business days between two dates, inclusive of both endpoints.
///
/// Closed-form rule (weekday numbering Sunday=0..Saturday=6), kept exactly
/// as-is so report numbers match the historical output bit-for-bit:
/// `1 + (days x 5 - (start.dow - end.dow) x 2) / 7`, then minus one when the
/// range ends on a Saturday and minus one when it starts on a Sunday.
/// Fractional results occur when the range starts or ends mid-week and are
/// preserved, not rounded.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> f64 {
    let total_days = (end - start).num_days() as f64;
    let start_dow = start.weekday().num_days_from_sunday() as f64;
    let end_dow = end.weekday().num_days_from_sunday() as f64;

    let mut days = 1.0 + (total_days * 5.0 - (start_dow - end_dow) * 2.0) / 7.0;

    if end.weekday() == Weekday::Sat {
        days -= 1.0;
    }
    if start.weekday() == Weekday::Sun {
        days -= 1.0;
    }

    days
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday of the week `today` falls in.
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

pub fn start_of_month(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

pub fn start_of_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
}

/// The most recent weekday strictly before `date`.
pub fn previous_workday(date: NaiveDate) -> NaiveDate {
    let mut day = date - Duration::days(1);
    while is_weekend(day) {
        day -= Duration::days(1);
    }
    day
}

/// First and last day of the given month, in the most recent occurrence of
/// that month: a month later in the calendar than `today`'s refers to last
/// year.
pub fn month_range(month: u32, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = if month > today.month() {
        today.year() - 1
    } else {
        today.year()
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month - Duration::days(1)))
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a month token: a number 1-12 or an English month name.
pub fn parse_month(input: &str) -> Option<u32> {
    if let Ok(n) = input.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lowered = input.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| *name == lowered)
        .map(|i| i as u32 + 1)
}

/// Accepted explicit-date formats in report commands.
const REPORT_DATE_FORMATS: [&str; 4] = ["%Y.%m.%d", "%Y%m%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Accepted date formats in the time-off command.
pub const TIME_OFF_DATE_FORMATS: [&str; 5] =
    ["%d.%m.%Y", "%Y%m%d", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

pub fn parse_report_date(input: &str) -> Option<NaiveDate> {
    parse_date_any(input, &REPORT_DATE_FORMATS)
}

pub fn parse_time_off_date(input: &str) -> Option<NaiveDate> {
    parse_date_any(input, &TIME_OFF_DATE_FORMATS)
}

fn parse_date_any(input: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn business_days_single_monday_is_one() {
        let monday = date(2026, 3, 2);
        assert_eq!(business_days(monday, monday), 1.0);
    }

    #[test]
    fn business_days_monday_through_friday_is_five() {
        assert_eq!(business_days(date(2026, 3, 2), date(2026, 3, 6)), 5.0);
    }

    #[test]
    fn business_days_full_week_is_five() {
        // Monday through Sunday.
        assert_eq!(business_days(date(2026, 3, 2), date(2026, 3, 8)), 5.0);
    }

    #[test]
    fn business_days_ending_saturday_is_decremented() {
        // Monday through Saturday.
        assert_eq!(business_days(date(2026, 3, 2), date(2026, 3, 7)), 5.0);
    }

    #[test]
    fn business_days_starting_sunday_is_decremented() {
        // Sunday through Friday.
        assert_eq!(business_days(date(2026, 3, 1), date(2026, 3, 6)), 5.0);
    }

    #[test]
    fn business_days_can_be_fractional() {
        // Wednesday through next Tuesday: the closed form yields a
        // non-integral count that must be preserved.
        let result = business_days(date(2026, 3, 4), date(2026, 3, 10));
        assert!((result - 4.857142857142857).abs() < 1e-9);
    }

    #[test]
    fn start_of_week_is_monday() {
        assert_eq!(start_of_week(date(2026, 3, 5)), date(2026, 3, 2));
        assert_eq!(start_of_week(date(2026, 3, 2)), date(2026, 3, 2));
        assert_eq!(start_of_week(date(2026, 3, 8)), date(2026, 3, 2));
    }

    #[test]
    fn previous_workday_skips_weekends() {
        // Monday -> previous Friday.
        assert_eq!(previous_workday(date(2026, 3, 2)), date(2026, 2, 27));
        // Thursday -> Wednesday.
        assert_eq!(previous_workday(date(2026, 3, 5)), date(2026, 3, 4));
    }

    #[test]
    fn month_range_rolls_back_to_last_year_for_future_months() {
        let today = date(2026, 3, 15);
        let (start, end) = month_range(2, today).unwrap();
        assert_eq!(start, date(2026, 2, 1));
        assert_eq!(end, date(2026, 2, 28));

        let (start, end) = month_range(11, today).unwrap();
        assert_eq!(start, date(2025, 11, 1));
        assert_eq!(end, date(2025, 11, 30));
    }

    #[test]
    fn month_range_handles_december() {
        let today = date(2026, 12, 10);
        let (start, end) = month_range(12, today).unwrap();
        assert_eq!(start, date(2026, 12, 1));
        assert_eq!(end, date(2026, 12, 31));
    }

    #[test]
    fn parse_month_accepts_numbers_and_names() {
        assert_eq!(parse_month("2"), Some(2));
        assert_eq!(parse_month("12"), Some(12));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("March"), Some(3));
        assert_eq!(parse_month("december"), Some(12));
        assert_eq!(parse_month("notamonth"), None);
    }

    #[test]
    fn report_dates_parse_in_all_accepted_formats() {
        let expected = date(2026, 3, 4);
        for input in ["2026.03.04", "20260304", "04.03.2026", "04/03/2026"] {
            assert_eq!(parse_report_date(input), Some(expected), "input {input}");
        }
        assert_eq!(parse_report_date("tomorrow"), None);
    }

    #[test]
    fn time_off_dates_parse_in_all_accepted_formats() {
        let expected = date(2026, 3, 4);
        for input in ["04.03.2026", "20260304", "04/03/2026", "04-03-2026", "2026-03-04"] {
            assert_eq!(parse_time_off_date(input), Some(expected), "input {input}");
        }
    }
}
