// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Timewarden bot.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain model used throughout the Timewarden workspace. All collaborator
//! adapters implement traits defined here.

pub mod error;
pub mod subscriber;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WardenError;
pub use subscriber::{
    AlertTimestamps, Subscriber, Workflow, WorkflowKind, WorkflowResult, WorkingHours,
    DEFAULT_HOURS_PER_DAY, WORKFLOW_TTL_MINUTES,
};
pub use types::{
    ActiveTasksInfo, ChangeEvent, ParentRef, PendingReviewsInfo, ReviewInfo, TaskInfo,
    TextFormat, TimeOffEntry, TimeReport, WorkItem, WorkItemTime,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    BacklogAccessor, ChatTransport, MailSender, Notifier, PinGenerator, RandomPinGenerator,
    SubscriberStore,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn warden_error_has_all_variants() {
        let _config = WardenError::Config("test".into());
        let _storage = WardenError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = WardenError::Channel {
            message: "test".into(),
            source: None,
        };
        let _backlog = WardenError::Backlog {
            user: "dev@example.com".into(),
            message: "query failed".into(),
            source: None,
        };
        let _mail = WardenError::Mail {
            message: "smtp down".into(),
            source: None,
        };
        let _router = WardenError::UnroutableCommand {
            chat_id: "42".into(),
        };
        let _internal = WardenError::Internal("test".into());
    }

    #[test]
    fn backlog_error_names_the_user() {
        let err = WardenError::Backlog {
            user: "dev@example.com".into(),
            message: "timeout".into(),
            source: None,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("dev@example.com"));
        assert!(rendered.contains("timeout"));
    }

    #[test]
    fn workflow_kind_display_roundtrip() {
        let kinds = [
            WorkflowKind::Account,
            WorkflowKind::Settings,
            WorkflowKind::Snooze,
            WorkflowKind::TimeOff,
            WorkflowKind::Delete,
            WorkflowKind::Info,
            WorkflowKind::ActiveTasks,
            WorkflowKind::PullRequests,
            WorkflowKind::Standup,
            WorkflowKind::Day,
            WorkflowKind::Week,
            WorkflowKind::Month,
            WorkflowKind::Year,
            WorkflowKind::Healthcheck,
            WorkflowKind::StoryInfo,
        ];
        assert_eq!(kinds.len(), 15, "one workflow per command surface entry");

        for kind in &kinds {
            let s = kind.to_string();
            let parsed = WorkflowKind::from_str(&s).expect("should parse back");
            assert_eq!(*kind, parsed);
        }
    }
}
