// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-step lookups: account info, active tasks, pending reviews.

use timewarden_core::{Subscriber, WardenError, WorkflowResult};

use crate::context::WorkflowContext;

pub async fn info(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
) -> Result<WorkflowResult, WardenError> {
    ctx.notifier.account_info(subscriber).await?;
    Ok(WorkflowResult::Finished)
}

pub async fn active_tasks(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
) -> Result<WorkflowResult, WardenError> {
    ctx.reporting.active_tasks_report(subscriber).await?;
    Ok(WorkflowResult::Finished)
}

pub async fn pull_requests(
    ctx: &WorkflowContext,
    subscriber: &Subscriber,
) -> Result<WorkflowResult, WardenError> {
    if subscriber.project_filters.is_empty() {
        ctx.notifier
            .respond(
                &subscriber.chat_id,
                "Please set your project(s) first. Use /setsettings and set \
                 Projects=ProjA (or Projects=ProjA,ProjB).",
            )
            .await?;
        return Ok(WorkflowResult::Finished);
    }

    ctx.reporting.pending_reviews_report(subscriber).await?;
    Ok(WorkflowResult::Finished)
}
