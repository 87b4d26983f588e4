// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions consumed by the core engines.

pub mod backlog;
pub mod mail;
pub mod notifier;
pub mod pin;
pub mod store;
pub mod transport;

pub use backlog::BacklogAccessor;
pub use mail::MailSender;
pub use notifier::Notifier;
pub use pin::{PinGenerator, RandomPinGenerator};
pub use store::SubscriberStore;
pub use transport::ChatTransport;
