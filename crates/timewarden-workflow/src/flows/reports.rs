// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report triggers: `/day`, `/week`, `/month`, `/year` with optional explicit
//! date or month arguments, plus `/standup`, `/healthcheck` and `/storyinfo`.

use chrono::{NaiveDate, Utc};

use timewarden_core::{Subscriber, WardenError, WorkflowKind, WorkflowResult};
use timewarden_reporting::calendar::{
    month_range, parse_month, parse_report_date, start_of_month, start_of_week, start_of_year,
};

use crate::context::WorkflowContext;

/// Period report. The default range depends on the command; an explicit date
/// (several accepted formats) or month token (number or English name) in the
/// arguments overrides it.
pub async fn work_hours(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
    kind: WorkflowKind,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let today = Utc::now().date_naive();
    let mut start = default_start(kind, today);
    let mut end: Option<NaiveDate> = None;

    let tokens: Vec<&str> = input.split_whitespace().collect();
    if let Some(first) = tokens.get(1) {
        if let Some(date) = parse_report_date(first) {
            start = date;
        } else if let Some((month_start, month_end)) =
            parse_month(first).and_then(|m| month_range(m, today))
        {
            start = month_start;
            end = Some(month_end);
        }
    }
    if let Some(second) = tokens.get(2) {
        if let Some(date) = parse_report_date(second) {
            end = Some(date);
        } else if let Some((_, month_end)) = parse_month(second).and_then(|m| month_range(m, today))
        {
            end = Some(month_end);
        }
    }

    ctx.reporting
        .work_hours_report(subscriber, start, end)
        .await?;
    Ok(WorkflowResult::Finished)
}

fn default_start(kind: WorkflowKind, today: NaiveDate) -> NaiveDate {
    match kind {
        WorkflowKind::Week => start_of_week(today),
        WorkflowKind::Month => start_of_month(today),
        WorkflowKind::Year => start_of_year(today),
        _ => today,
    }
}

pub async fn standup(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
) -> Result<WorkflowResult, WardenError> {
    ctx.reporting.standup_report(subscriber).await?;
    Ok(WorkflowResult::Finished)
}

/// `/healthcheck [threshold]`: month-to-date detailed report flagging rows
/// whose active/completed gap exceeds the threshold (default 0).
pub async fn healthcheck(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let threshold = input
        .split_whitespace()
        .nth(1)
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0);

    let start = start_of_month(Utc::now().date_naive());
    ctx.reporting
        .healthcheck_report(subscriber, start, threshold)
        .await?;
    Ok(WorkflowResult::Finished)
}

pub async fn story_info(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let Some(item_id) = input
        .split_whitespace()
        .nth(1)
        .and_then(|raw| raw.parse::<i64>().ok())
    else {
        ctx.notifier
            .respond(&subscriber.chat_id, "Usage: /storyinfo <work item id>")
            .await?;
        return Ok(WorkflowResult::Finished);
    };

    ctx.reporting.story_info_report(subscriber, item_id).await?;
    Ok(WorkflowResult::Finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranges_follow_the_command() {
        let thursday = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(default_start(WorkflowKind::Day, thursday), thursday);
        assert_eq!(
            default_start(WorkflowKind::Week, thursday),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(
            default_start(WorkflowKind::Month, thursday),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            default_start(WorkflowKind::Year, thursday),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }
}
