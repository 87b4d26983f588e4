// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-formatting helpers shared by the notifier methods.

use chrono::{Datelike, NaiveDate};

use timewarden_core::TimeReport;

/// Maximum title width inside fixed-width task tables.
pub const MAX_TITLE_LENGTH: usize = 20;

/// Escape for HTML-formatted chat messages.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Web address of a work item's edit page.
pub fn item_url(base_url: &str, item_id: i64) -> String {
    format!("{}/_workitems/edit/{item_id}", base_url.trim_end_matches('/'))
}

/// Human label for a report period.
///
/// A single day renders as `dd/MM/yyyy`, an exact calendar month as
/// `March 2026`, anything else as a `from - to` range.
pub fn period_label(report: &TimeReport) -> String {
    if report.start == report.end {
        return report.start.format("%d/%m/%Y").to_string();
    }

    let is_full_month = report.start.day() == 1
        && report.start.month() == report.end.month()
        && report.start.year() == report.end.year()
        && (report.end + chrono::Duration::days(1)).month() != report.end.month();
    if is_full_month {
        return report.start.format("%B %Y").to_string();
    }

    format!(
        "{} - {}",
        report.start.format("%d/%m/%Y"),
        report.end.format("%d/%m/%Y")
    )
}

/// Hard word wrap at `max_length` characters per line.
pub fn wrap_title(title: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = title.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(max_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Days whose completed-hours sum deviates from the daily target by more
/// than a hundredth of an hour, ordered by date.
pub fn anomalous_days(report: &TimeReport, hours_per_day: u32) -> Vec<(NaiveDate, f64)> {
    let mut by_date: Vec<(NaiveDate, f64)> = Vec::new();
    for item in report.items() {
        match by_date.iter_mut().find(|(date, _)| *date == item.date) {
            Some((_, hours)) => *hours += item.completed,
            None => by_date.push((item.date, item.completed)),
        }
    }
    by_date.retain(|(_, hours)| (hours - f64::from(hours_per_day)).abs() > 0.01);
    by_date.sort_by_key(|(date, _)| *date);
    by_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use timewarden_core::WorkItemTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: i64, date: NaiveDate, completed: f64) -> WorkItemTime {
        WorkItemTime {
            id,
            title: format!("task {id}"),
            date,
            estimated: 0.0,
            completed,
            active: 0.0,
        }
    }

    #[test]
    fn period_label_single_day() {
        let report = TimeReport::new(date(2026, 3, 3), date(2026, 3, 3));
        assert_eq!(period_label(&report), "03/03/2026");
    }

    #[test]
    fn period_label_full_month() {
        let report = TimeReport::new(date(2026, 3, 1), date(2026, 3, 31));
        assert_eq!(period_label(&report), "March 2026");
    }

    #[test]
    fn period_label_arbitrary_range() {
        let report = TimeReport::new(date(2026, 3, 2), date(2026, 3, 13));
        assert_eq!(period_label(&report), "02/03/2026 - 13/03/2026");
    }

    #[test]
    fn titles_wrap_at_the_column_width() {
        let lines = wrap_title("a title that is clearly too long", 20);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 20);
    }

    #[test]
    fn anomalous_days_skip_on_target_dates() {
        let mut report = TimeReport::new(date(2026, 3, 2), date(2026, 3, 4));
        report.add_item(row(1, date(2026, 3, 2), 8.0));
        report.add_item(row(2, date(2026, 3, 3), 5.0));
        report.add_item(row(3, date(2026, 3, 3), 1.0));

        let days = anomalous_days(&report, 8);
        assert_eq!(days, vec![(date(2026, 3, 3), 6.0)]);
    }

    #[test]
    fn html_escape_handles_markup() {
        assert_eq!(html_escape("a<b> & c"), "a&lt;b&gt; &amp; c");
    }
}
