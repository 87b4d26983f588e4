// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporarily silence all alerts.

use chrono::{Duration, Utc};

use timewarden_core::{Subscriber, WardenError, WorkflowResult};

use crate::context::WorkflowContext;

const DEFAULT_SNOOZE_MINUTES: i64 = 30;

pub async fn step(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let mut tokens = input.split_whitespace();
    tokens.next(); // command token

    let minutes = match tokens.next() {
        Some(raw) => match raw.parse::<i64>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                ctx.notifier
                    .respond(
                        &subscriber.chat_id,
                        "Please provide a valid number of minutes to snooze alerts",
                    )
                    .await?;
                return Ok(WorkflowResult::Continue);
            }
        },
        None => DEFAULT_SNOOZE_MINUTES,
    };

    subscriber.snooze_until = Some(Utc::now() + Duration::minutes(minutes));
    ctx.notifier
        .respond(
            &subscriber.chat_id,
            &format!("You won't receive any alerts for the next {minutes} minutes."),
        )
        .await?;

    Ok(WorkflowResult::Finished)
}
