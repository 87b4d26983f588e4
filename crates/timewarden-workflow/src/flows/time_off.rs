// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-off ledger adjustments: `/addtimeoff <hours> [date]`.

use chrono::{NaiveDate, Utc};

use timewarden_core::{Subscriber, WardenError, WorkflowResult};
use timewarden_reporting::calendar::{parse_time_off_date, TIME_OFF_DATE_FORMATS};

use crate::context::WorkflowContext;

pub async fn step(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let chat_id = subscriber.chat_id.clone();
    let tokens: Vec<&str> = input.split_whitespace().collect();

    let Some(date) = parse_date_argument(&tokens) else {
        let mut text = String::from(
            "Please provide a valid date or leave empty to use the current date.\nAccepted formats:\n",
        );
        for format in TIME_OFF_DATE_FORMATS {
            text.push_str(&format!("- {format}\n"));
        }
        ctx.notifier.respond(&chat_id, &text).await?;
        return Ok(WorkflowResult::Finished);
    };

    let Some(hours) = tokens.get(1).and_then(|raw| raw.parse::<i32>().ok()) else {
        ctx.notifier
            .respond(
                &chat_id,
                "Please provide a valid number of hours off (ex. /addtimeoff 8) \
                 and optionally a date.",
            )
            .await?;
        return Ok(WorkflowResult::Finished);
    };

    let date_label = date.format("%d.%m.%Y");
    let message = if hours >= 0 {
        subscriber.adjust_time_off(date, hours);
        format!("{hours} hours added as time off on {date_label}")
    } else if subscriber.time_off.iter().any(|e| e.date == date) {
        subscriber.adjust_time_off(date, hours);
        format!("Time off removed from {date_label}")
    } else {
        format!("No time off found for {date_label}. Nothing to do.")
    };

    ctx.notifier.respond(&chat_id, &message).await?;
    Ok(WorkflowResult::Finished)
}

/// Third token is an explicit date; absent means today. A third token that
/// parses in none of the accepted formats is an error, not today.
fn parse_date_argument(tokens: &[&str]) -> Option<NaiveDate> {
    match tokens.get(2) {
        Some(raw) => parse_time_off_date(raw),
        None => Some(Utc::now().date_naive()),
    }
}
