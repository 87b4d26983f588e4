// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preference changes: one-shot `Key=Value` or a two-turn prompt/answer flow.

use chrono::NaiveTime;
use tracing::info;

use timewarden_core::{Subscriber, WardenError, WorkingHours, Workflow, WorkflowResult};

use crate::context::WorkflowContext;

pub const WORKING_HOURS_SETTING: &str = "Workhours";
pub const HOURS_PER_DAY_SETTING: &str = "HoursPerDay";
pub const PROJECTS_SETTING: &str = "Projects";

const SETTING_NAMES: [&str; 3] = [
    WORKING_HOURS_SETTING,
    HOURS_PER_DAY_SETTING,
    PROJECTS_SETTING,
];

const STEP_START: u32 = 0;
const STEP_NAME: u32 = 1;
const STEP_VALUE: u32 = 2;

pub async fn step(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    workflow: &mut Workflow,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    let chat_id = subscriber.chat_id.clone();

    let (name, value) = match workflow.step {
        STEP_START => {
            // One-shot usage: "/setsettings Key=value".
            let remainder = strip_command(input);
            if let Some((name, value)) = remainder.split_once('=') {
                let name = name.trim().to_string();
                let value = value.trim().to_string();
                if is_valid_name(&name) {
                    (name, value)
                } else {
                    return prompt_for_name(ctx, &chat_id, workflow).await;
                }
            } else {
                return prompt_for_name(ctx, &chat_id, workflow).await;
            }
        }
        STEP_NAME => {
            let mut parts = input.splitn(2, '=');
            let name = parts.next().unwrap_or_default().trim().to_string();
            if !is_valid_name(&name) {
                ctx.notifier
                    .respond(&chat_id, "Please provide a valid setting name")
                    .await?;
                return Ok(WorkflowResult::Continue);
            }

            match parts.next() {
                Some(value) => (name, value.trim().to_string()),
                None => {
                    workflow.data = name.clone();
                    workflow.step = STEP_VALUE;
                    ctx.notifier
                        .respond(
                            &chat_id,
                            &format!(
                                "Please provide a new setting value. Actual={}",
                                current_value(subscriber, &name)
                            ),
                        )
                        .await?;
                    return Ok(WorkflowResult::Continue);
                }
            }
        }
        _ => (workflow.data.clone(), input.trim().to_string()),
    };

    if apply(subscriber, &name, &value) {
        info!(setting = %name, value = %value, "setting changed");
        ctx.notifier
            .respond(&chat_id, &format!("From now on {name}={value}"))
            .await?;
        Ok(WorkflowResult::Finished)
    } else {
        ctx.notifier
            .respond(
                &chat_id,
                &format!("Could not change {name}={value}. Please try again."),
            )
            .await?;
        workflow.step = STEP_NAME;
        Ok(WorkflowResult::Continue)
    }
}

async fn prompt_for_name(
    ctx: &WorkflowContext,
    chat_id: &str,
    workflow: &mut Workflow,
) -> Result<WorkflowResult, WardenError> {
    let mut text = String::from("Please enter one of the following preferences to change:\n");
    for name in SETTING_NAMES {
        text.push_str(&format!("-{name}\n"));
    }
    text.push_str("You can send setting and value together using this format: SettingX=value");

    ctx.notifier.respond(chat_id, &text).await?;
    workflow.step = STEP_NAME;
    Ok(WorkflowResult::Continue)
}

fn strip_command(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("/setsettings")
        .unwrap_or(trimmed)
        .trim()
}

fn is_valid_name(name: &str) -> bool {
    SETTING_NAMES.contains(&name)
}

fn current_value(subscriber: &Subscriber, name: &str) -> String {
    match name {
        HOURS_PER_DAY_SETTING => subscriber.hours_per_day.to_string(),
        WORKING_HOURS_SETTING => match &subscriber.working_hours {
            Some(hours) => format!(
                "{}-{}",
                hours.start.format("%H:%M"),
                hours.end.format("%H:%M")
            ),
            None => "(unset)".to_string(),
        },
        PROJECTS_SETTING => {
            if subscriber.project_filters.is_empty() {
                "(all)".to_string()
            } else {
                subscriber.project_filters.join(",")
            }
        }
        _ => String::new(),
    }
}

fn apply(subscriber: &mut Subscriber, name: &str, value: &str) -> bool {
    match name {
        HOURS_PER_DAY_SETTING => match value.parse::<u32>() {
            Ok(hours) => {
                subscriber.hours_per_day = hours;
                true
            }
            Err(_) => false,
        },
        WORKING_HOURS_SETTING => match parse_working_hours(value) {
            Some(hours) => {
                subscriber.working_hours = Some(hours);
                true
            }
            None => false,
        },
        PROJECTS_SETTING => {
            // "*", "all" or an empty value clears the filter.
            let raw = value.trim();
            if raw.is_empty() || raw == "*" || raw.eq_ignore_ascii_case("all") {
                subscriber.project_filters.clear();
                return true;
            }

            let mut projects: Vec<String> = Vec::new();
            for part in raw.split([',', ';']) {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                if !projects.iter().any(|p| p.eq_ignore_ascii_case(part)) {
                    projects.push(part.to_string());
                }
            }

            if projects.is_empty() {
                false
            } else {
                subscriber.project_filters = projects;
                true
            }
        }
        _ => false,
    }
}

/// Parse a "HH:MM-HH:MM" window; the end must be after the start.
fn parse_working_hours(value: &str) -> Option<WorkingHours> {
    let mut parts = value.split(['-', ' ']).filter(|p| !p.is_empty());
    let start = NaiveTime::parse_from_str(parts.next()?, "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(parts.next()?, "%H:%M").ok()?;
    if parts.next().is_some() || end <= start {
        return None;
    }
    Some(WorkingHours { start, end })
}
