// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-step confirmed account deletion.

use tracing::info;

use timewarden_core::{Subscriber, WardenError, Workflow, WorkflowResult};

use crate::context::WorkflowContext;

const STEP_CONFIRM: u32 = 0;

pub async fn step(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    workflow: &mut Workflow,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    if workflow.step == STEP_CONFIRM {
        ctx.notifier
            .respond(&subscriber.chat_id, "Are you sure? (Y/N)")
            .await?;
        workflow.step = 1;
        return Ok(WorkflowResult::Continue);
    }

    let answer = input.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        info!(chat_id = %subscriber.chat_id, "deleting subscriber");
        ctx.store.delete(&subscriber.chat_id).await?;
        ctx.notifier
            .respond(&subscriber.chat_id, "Your account has been deleted.")
            .await?;
    }

    Ok(WorkflowResult::Finished)
}
