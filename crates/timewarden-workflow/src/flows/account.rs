// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration and verification: ask for the email, deliver a one-time code
//! out-of-band, then check the code with a capped attempt budget.

use tracing::info;

use timewarden_core::{Subscriber, WardenError, Workflow, WorkflowResult};

use crate::context::WorkflowContext;

const STEP_START: u32 = 0;
const STEP_ENTER_EMAIL: u32 = 1;
const STEP_VERIFY_CODE: u32 = 2;

/// After this many failed code checks the account fails closed; even a
/// correct code no longer verifies and the user has to ask for help.
const MAX_VERIFICATION_ATTEMPTS: u32 = 3;

pub async fn step(
    ctx: &WorkflowContext,
    subscriber: &mut Subscriber,
    workflow: &mut Workflow,
    input: &str,
) -> Result<WorkflowResult, WardenError> {
    match workflow.step {
        STEP_START => {
            ctx.notifier.request_email(&subscriber.chat_id).await?;
            workflow.step = STEP_ENTER_EMAIL;
            Ok(WorkflowResult::Continue)
        }
        STEP_ENTER_EMAIL => {
            let candidate = input.trim();
            if !is_acceptable_email(candidate, ctx.email_domain.as_deref()) {
                ctx.notifier.incorrect_email(&subscriber.chat_id).await?;
                return Ok(WorkflowResult::Continue);
            }

            subscriber.email = candidate.to_string();
            subscriber.is_verified = false;
            subscriber.pin = ctx.pins.next_pin();

            ctx.notifier.email_updated(subscriber).await?;
            ctx.mail
                .send(
                    "Timewarden verification code",
                    &format!(
                        "Please send the following PIN to the bot through the chat: {}",
                        subscriber.pin
                    ),
                    &subscriber.email,
                )
                .await?;

            workflow.step = STEP_VERIFY_CODE;
            Ok(WorkflowResult::Continue)
        }
        STEP_VERIFY_CODE => {
            let Ok(code) = input.trim().parse::<u32>() else {
                ctx.notifier.could_not_verify(subscriber).await?;
                return Ok(WorkflowResult::Continue);
            };

            if verify(subscriber, code) {
                ctx.notifier.account_verified(subscriber).await?;
                Ok(WorkflowResult::Finished)
            } else {
                ctx.notifier.could_not_verify(subscriber).await?;
                Ok(WorkflowResult::Finished)
            }
        }
        _ => Ok(WorkflowResult::Finished),
    }
}

fn is_acceptable_email(input: &str, required_domain: Option<&str>) -> bool {
    if input.is_empty() || !input.contains('@') {
        return false;
    }
    match required_domain {
        Some(domain) => input.ends_with(domain),
        None => true,
    }
}

/// Check the entered code against the stored one.
///
/// The attempt counter increments before the comparison, and the bound is
/// inclusive: the third attempt may still succeed, the fourth never does.
fn verify(subscriber: &mut Subscriber, code: u32) -> bool {
    if subscriber.is_verified {
        return true;
    }

    subscriber.verification_attempts += 1;
    info!(
        email = %subscriber.email,
        attempts = subscriber.verification_attempts,
        "verifying account"
    );

    if subscriber.pin == code && subscriber.verification_attempts <= MAX_VERIFICATION_ATTEMPTS {
        subscriber.is_verified = true;
        subscriber.verification_attempts = 0;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_plausibility_and_domain_suffix() {
        assert!(is_acceptable_email("dev@example.com", None));
        assert!(is_acceptable_email("dev@example.com", Some("example.com")));
        assert!(!is_acceptable_email("dev@gmail.com", Some("example.com")));
        assert!(!is_acceptable_email("not-an-email", None));
        assert!(!is_acceptable_email("", None));
    }

    #[test]
    fn third_attempt_may_succeed_fourth_never_does() {
        let mut sub = Subscriber::new("42", 5555);

        assert!(!verify(&mut sub, 1111));
        assert!(!verify(&mut sub, 2222));
        assert!(verify(&mut sub, 5555));
        assert!(sub.is_verified);
        assert_eq!(sub.verification_attempts, 0);

        let mut sub = Subscriber::new("42", 5555);
        for _ in 0..3 {
            assert!(!verify(&mut sub, 1111));
        }
        // Fails closed: the correct code no longer verifies.
        assert!(!verify(&mut sub, 5555));
        assert!(!sub.is_verified);
    }
}
