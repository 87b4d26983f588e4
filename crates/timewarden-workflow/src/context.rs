// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared collaborators handed to every workflow step.

use std::sync::Arc;

use timewarden_core::{BacklogAccessor, MailSender, Notifier, PinGenerator, SubscriberStore};
use timewarden_reporting::ReportingService;

/// Everything a workflow step may need, bundled once at startup.
#[derive(Clone)]
pub struct WorkflowContext {
    pub notifier: Arc<dyn Notifier>,
    pub backlog: Arc<dyn BacklogAccessor>,
    pub store: Arc<dyn SubscriberStore>,
    pub mail: Arc<dyn MailSender>,
    pub pins: Arc<dyn PinGenerator>,
    pub reporting: Arc<ReportingService>,
    /// Required email-domain suffix for registration, when configured.
    pub email_domain: Option<String>,
}
