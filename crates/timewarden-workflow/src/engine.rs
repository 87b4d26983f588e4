// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step execution shared by all workflows.
//!
//! The per-kind step logic lives in [`crate::flows`]; this module applies the
//! common front matter in a fixed order: verification gate, anti-brute-force
//! pause, cancel token, then dispatch. A failure inside step logic produces a
//! generic apology and propagates; the caller decides what to do with the
//! workflow slot.

use std::time::Duration;

use tracing::{error, info};

use timewarden_core::{Subscriber, WardenError, Workflow, WorkflowKind, WorkflowResult};

use crate::context::WorkflowContext;
use crate::flows;

/// Universal token that ends the current workflow from inside a step.
pub const CANCEL_TOKEN: &str = "/cancel";

/// Pause before answering unverified users, to slow down enumeration.
const UNVERIFIED_PAUSE_MS: u64 = 2000;

/// Whether a workflow kind is available to unverified subscribers.
///
/// Only registration itself is open; the user is by definition unverified
/// while running it.
pub fn requires_verification(kind: WorkflowKind) -> bool {
    kind != WorkflowKind::Account
}

/// Run one step of the given workflow against an input line.
pub async fn execute(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    workflow: &mut Workflow,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    info!(
        kind = %workflow.kind,
        step = workflow.step,
        chat_id = %subscriber.chat_id,
        "executing workflow step"
    );

    if requires_verification(workflow.kind) && !subscriber.is_verified {
        info!(kind = %workflow.kind, "command requires a verified account");
        ctx.notifier
            .respond(&subscriber.chat_id, "Verification is required")
            .await?;
        return Ok(WorkflowResult::Finished);
    }

    if !requires_verification(workflow.kind) && !subscriber.is_verified {
        tokio::time::sleep(Duration::from_millis(UNVERIFIED_PAUSE_MS)).await;
    }

    if input.trim().eq_ignore_ascii_case(CANCEL_TOKEN) {
        ctx.notifier
            .respond(&subscriber.chat_id, "Command cancelled")
            .await?;
        return Ok(WorkflowResult::Finished);
    }

    ctx.notifier.typing(&subscriber.chat_id).await?;

    match dispatch(ctx, subscriber, workflow, input).await {
        Ok(result) => Ok(result),
        Err(error) => {
            error!(%error, kind = %workflow.kind, "workflow step failed");
            ctx.notifier
                .respond(&subscriber.chat_id, "Something bad happened to the bot :(")
                .await?;
            Err(error)
        }
    }
}

async fn dispatch(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    workflow: &mut Workflow,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    match workflow.kind {
        WorkflowKind::Account => flows::account::step(ctx, subscriber, workflow, input).await,
        WorkflowKind::Settings => flows::settings::step(ctx, subscriber, workflow, input).await,
        WorkflowKind::Snooze => flows::snooze::step(ctx, subscriber, input).await,
        WorkflowKind::TimeOff => flows::time_off::step(ctx, subscriber, input).await,
        WorkflowKind::Delete => flows::delete::step(ctx, subscriber, workflow, input).await,
        WorkflowKind::Info => flows::queries::info(ctx, subscriber).await,
        WorkflowKind::ActiveTasks => flows::queries::active_tasks(ctx, subscriber).await,
        WorkflowKind::PullRequests => flows::queries::pull_requests(ctx, subscriber).await,
        WorkflowKind::Standup => flows::reports::standup(ctx, subscriber).await,
        WorkflowKind::Day
        | WorkflowKind::Week
        | WorkflowKind::Month
        | WorkflowKind::Year => {
            flows::reports::work_hours(ctx, subscriber, workflow.kind, input).await
        }
        WorkflowKind::Healthcheck => flows::reports::healthcheck(ctx, subscriber, input).await,
        WorkflowKind::StoryInfo => flows::reports::story_info(ctx, subscriber, input).await,
    }
}
