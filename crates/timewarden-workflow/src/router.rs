// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message resolution.
//!
//! One router instance serves all chats. Per message: load (or create) the
//! subscriber, resume a live workflow if one is stored, otherwise match the
//! input against the ordered trigger table and start a fresh workflow. The
//! subscriber is persisted after every resolution.

use chrono::Utc;
use tracing::{debug, info};

use timewarden_core::{Subscriber, WardenError, Workflow, WorkflowKind, WorkflowResult};

use crate::context::WorkflowContext;
use crate::engine;

/// Universal token that drops the active workflow without running a step.
pub const ABORT_TOKEN: &str = "/abort";

/// Universal token accepted by every trigger.
pub const EXIT_TOKEN: &str = "/exit";

/// Trigger table, in priority order. First acceptor wins, so tokens that
/// prefix each other must keep the longer one first.
const TRIGGERS: [(WorkflowKind, &str); 15] = [
    (WorkflowKind::Snooze, "/snooze"),
    (WorkflowKind::Settings, "/setsettings"),
    (WorkflowKind::ActiveTasks, "/active"),
    (WorkflowKind::PullRequests, "/pr"),
    (WorkflowKind::Standup, "/standup"),
    (WorkflowKind::Day, "/day"),
    (WorkflowKind::Week, "/week"),
    (WorkflowKind::Month, "/month"),
    (WorkflowKind::Year, "/year"),
    (WorkflowKind::Healthcheck, "/healthcheck"),
    (WorkflowKind::Info, "/info"),
    (WorkflowKind::TimeOff, "/addtimeoff"),
    (WorkflowKind::Delete, "/delete"),
    (WorkflowKind::Account, "/email"),
    (WorkflowKind::StoryInfo, "/storyinfo"),
];

pub struct CommandRouter {
    ctx: WorkflowContext,
}

impl CommandRouter {
    pub fn new(ctx: WorkflowContext) -> Self {
        Self { ctx }
    }

    /// Resolve one inbound message for a chat.
    pub async fn handle_message(&self, chat_id: &str, text: &str) -> Result<(), WardenError> {
        let input = text.trim();
        if input.is_empty() {
            return Ok(());
        }

        info!(chat_id, "processing command");
        self.ctx.notifier.typing(chat_id).await?;

        let mut subscriber = match self.ctx.store.get_by_id(chat_id).await? {
            Some(subscriber) => subscriber,
            None => self.new_subscriber(chat_id).await?,
        };

        let now = Utc::now();
        if subscriber
            .active_workflow
            .as_ref()
            .is_some_and(|wf| wf.is_expired(now))
        {
            debug!(chat_id, "discarding expired workflow");
            subscriber.active_workflow = None;
        }

        if input.eq_ignore_ascii_case(ABORT_TOKEN) {
            let reply = if subscriber.active_workflow.take().is_some() {
                "Command aborted"
            } else {
                "Nothing to abort"
            };
            self.ctx.notifier.respond(chat_id, reply).await?;
            self.ctx.store.upsert(&subscriber).await?;
            return Ok(());
        }

        let mut workflow = match subscriber.active_workflow.take() {
            Some(workflow) => workflow,
            None => {
                let Some(kind) = match_trigger(input) else {
                    // A command nothing accepts is a missing mapping, not a
                    // user error. Surface it loudly.
                    return Err(WardenError::UnroutableCommand {
                        chat_id: chat_id.to_string(),
                    });
                };
                Workflow::new(kind, now)
            }
        };

        let kind = workflow.kind;
        let result = engine::execute(&self.ctx, &mut subscriber, &mut workflow, input).await;
        match &result {
            Ok(WorkflowResult::Continue) => subscriber.active_workflow = Some(workflow),
            Ok(WorkflowResult::Finished) => {}
            // Keep the slot on failure; the TTL will expire it naturally.
            Err(_) => subscriber.active_workflow = Some(workflow),
        }

        // A finished delete flow may have removed the record; upserting now
        // would resurrect it.
        if kind == WorkflowKind::Delete
            && matches!(result, Ok(WorkflowResult::Finished))
            && self.ctx.store.get_by_id(chat_id).await?.is_none()
        {
            return Ok(());
        }

        self.ctx.store.upsert(&subscriber).await?;
        result.map(|_| ())
    }

    /// First contact: create an unverified subscriber already holding a
    /// registration workflow, so whatever the first message was, the reply
    /// asks for an email address.
    async fn new_subscriber(&self, chat_id: &str) -> Result<Subscriber, WardenError> {
        info!(chat_id, "first contact, creating subscriber");
        let mut subscriber = Subscriber::new(chat_id, self.ctx.pins.next_pin());
        subscriber.active_workflow = Some(Workflow::new(WorkflowKind::Account, Utc::now()));
        self.ctx.store.upsert(&subscriber).await?;
        Ok(subscriber)
    }
}

/// Match an input line against the trigger table. `/exit` is accepted by
/// every trigger, so it resolves to the first table entry.
fn match_trigger(input: &str) -> Option<WorkflowKind> {
    let lowered = input.trim().to_lowercase();
    if lowered == EXIT_TOKEN {
        return TRIGGERS.first().map(|(kind, _)| *kind);
    }
    TRIGGERS
        .iter()
        .find(|(_, token)| lowered.starts_with(token))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration, Timelike};
    use timewarden_core::SubscriberStore;
    use timewarden_reporting::ReportingService;
    use timewarden_test_utils::{
        FixedPinGenerator, MemorySubscriberStore, MockBacklog, MockMailSender, MockNotifier,
    };

    struct Harness {
        router: CommandRouter,
        notifier: Arc<MockNotifier>,
        store: Arc<MemorySubscriberStore>,
        mail: Arc<MockMailSender>,
    }

    fn harness() -> Harness {
        let notifier = Arc::new(MockNotifier::new());
        let backlog = Arc::new(MockBacklog::new());
        let store = Arc::new(MemorySubscriberStore::new());
        let mail = Arc::new(MockMailSender::new());
        let reporting = Arc::new(ReportingService::new(notifier.clone(), backlog.clone()));

        let ctx = WorkflowContext {
            notifier: notifier.clone(),
            backlog,
            store: store.clone(),
            mail: mail.clone(),
            pins: Arc::new(FixedPinGenerator(5555)),
            reporting,
            email_domain: Some("example.com".to_string()),
        };

        Harness {
            router: CommandRouter::new(ctx),
            notifier,
            store,
            mail,
        }
    }

    async fn verified(harness: &Harness, chat_id: &str) {
        let mut sub = Subscriber::new(chat_id, 5555);
        sub.email = format!("{chat_id}@example.com");
        sub.is_verified = true;
        harness.store.insert(sub).await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_contact_creates_subscriber_and_requests_email() {
        let h = harness();
        h.router.handle_message("42", "hello").await.unwrap();

        assert!(h.notifier.methods().await.contains(&"request_email"));
        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(!sub.is_verified);
        let wf = sub.active_workflow.unwrap();
        assert_eq!(wf.kind, WorkflowKind::Account);
        assert_eq!(wf.step, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn full_verification_flow() {
        let h = harness();
        h.router.handle_message("42", "/email").await.unwrap();
        assert!(h.notifier.methods().await.contains(&"request_email"));

        // Wrong domain is rejected, the flow stays on the email step.
        h.router
            .handle_message("42", "dev@gmail.com")
            .await
            .unwrap();
        assert!(h.notifier.methods().await.contains(&"incorrect_email"));

        h.router
            .handle_message("42", "dev@example.com")
            .await
            .unwrap();
        let mail = h.mail.sent().await;
        assert_eq!(mail.len(), 1);
        assert_eq!(mail[0].to_address, "dev@example.com");
        assert!(mail[0].body.contains("5555"));

        h.router.handle_message("42", "5555").await.unwrap();
        assert!(h.notifier.methods().await.contains(&"account_verified"));

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(sub.is_verified);
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_code_after_three_attempts_fails_closed() {
        let h = harness();

        for wrong in ["1111", "2222", "3333"] {
            h.router.handle_message("42", "/email").await.unwrap();
            h.router
                .handle_message("42", "dev@example.com")
                .await
                .unwrap();
            h.router.handle_message("42", wrong).await.unwrap();
        }

        // Even the correct code no longer verifies.
        h.router.handle_message("42", "/email").await.unwrap();
        h.router
            .handle_message("42", "dev@example.com")
            .await
            .unwrap();
        h.router.handle_message("42", "5555").await.unwrap();

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(!sub.is_verified);
        assert_eq!(sub.verification_attempts, 4);
    }

    #[tokio::test]
    async fn gated_commands_require_verification() {
        let h = harness();
        let mut sub = Subscriber::new("42", 5555);
        sub.email = "dev@example.com".into();
        h.store.insert(sub).await;

        h.router.handle_message("42", "/day").await.unwrap();

        let responses = h.notifier.responses().await;
        assert_eq!(responses, vec!["Verification is required"]);
        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test]
    async fn snooze_defaults_to_thirty_minutes() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/snooze").await.unwrap();

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        let until = sub.snooze_until.unwrap();
        let minutes = (until - Utc::now()).num_minutes();
        assert!((29..=30).contains(&minutes), "snoozed for {minutes} min");
        assert!(h.notifier.responses().await[0].contains("30 minutes"));
    }

    #[tokio::test]
    async fn one_shot_setting_change() {
        let h = harness();
        verified(&h, "42").await;

        h.router
            .handle_message("42", "/setsettings Workhours=09:00-17:00")
            .await
            .unwrap();

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        let hours = sub.working_hours.unwrap();
        assert_eq!((hours.start.hour(), hours.start.minute()), (9, 0));
        assert_eq!((hours.end.hour(), hours.end.minute()), (17, 0));
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test]
    async fn two_turn_setting_change() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/setsettings").await.unwrap();
        h.router.handle_message("42", "HoursPerDay").await.unwrap();
        h.router.handle_message("42", "6").await.unwrap();

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert_eq!(sub.hours_per_day, 6);
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test]
    async fn time_off_commands_net_out() {
        let h = harness();
        verified(&h, "42").await;

        h.router
            .handle_message("42", "/addtimeoff 8 05.03.2026")
            .await
            .unwrap();
        h.router
            .handle_message("42", "/addtimeoff -3 05.03.2026")
            .await
            .unwrap();

        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert_eq!(sub.time_off.len(), 1);
        assert_eq!(sub.time_off[0].hours_off, 5);
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/delete").await.unwrap();
        h.router.handle_message("42", "n").await.unwrap();
        assert!(h.store.get_by_id("42").await.unwrap().is_some());

        h.router.handle_message("42", "/delete").await.unwrap();
        h.router.handle_message("42", "y").await.unwrap();
        assert!(h.store.get_by_id("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancel_ends_the_active_workflow() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/setsettings").await.unwrap();
        h.router.handle_message("42", "/cancel").await.unwrap();

        assert!(h
            .notifier
            .responses()
            .await
            .contains(&"Command cancelled".to_string()));
        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test]
    async fn abort_clears_the_slot_or_says_so() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/abort").await.unwrap();
        assert!(h
            .notifier
            .responses()
            .await
            .contains(&"Nothing to abort".to_string()));

        h.router.handle_message("42", "/setsettings").await.unwrap();
        h.router.handle_message("42", "/abort").await.unwrap();
        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(sub.active_workflow.is_none());
        assert!(h
            .notifier
            .responses()
            .await
            .contains(&"Command aborted".to_string()));
    }

    #[tokio::test]
    async fn expired_workflow_is_never_resumed() {
        let h = harness();
        let mut sub = Subscriber::new("42", 5555);
        sub.email = "dev@example.com".into();
        sub.is_verified = true;
        let mut wf = Workflow::new(WorkflowKind::Settings, Utc::now());
        wf.expires_at = Utc::now() - Duration::minutes(1);
        wf.step = 1;
        sub.active_workflow = Some(wf);
        h.store.insert(sub).await;

        // Routed as a fresh command, not as a settings answer.
        h.router.handle_message("42", "/info").await.unwrap();

        assert!(h.notifier.methods().await.contains(&"account_info"));
        let sub = h.store.get_by_id("42").await.unwrap().unwrap();
        assert!(sub.active_workflow.is_none());
    }

    #[tokio::test]
    async fn unknown_command_is_a_loud_failure() {
        let h = harness();
        verified(&h, "42").await;

        let err = h
            .router
            .handle_message("42", "/frobnicate")
            .await
            .unwrap_err();
        assert!(matches!(err, WardenError::UnroutableCommand { .. }));
    }

    #[tokio::test]
    async fn pr_without_project_filters_explains_setup() {
        let h = harness();
        verified(&h, "42").await;

        h.router.handle_message("42", "/pr").await.unwrap();
        let responses = h.notifier.responses().await;
        assert!(responses[0].contains("/setsettings"));
    }

    #[test]
    fn trigger_order_matches_first_acceptor() {
        assert_eq!(match_trigger("/day"), Some(WorkflowKind::Day));
        assert_eq!(match_trigger("/DAY 20260304"), Some(WorkflowKind::Day));
        assert_eq!(match_trigger("/pr"), Some(WorkflowKind::PullRequests));
        assert_eq!(match_trigger("/storyinfo 42"), Some(WorkflowKind::StoryInfo));
        assert_eq!(match_trigger("/exit"), Some(WorkflowKind::Snooze));
        assert_eq!(match_trigger("hello"), None);
    }
}
