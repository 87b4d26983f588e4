// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared mocks and fixtures for deterministic Timewarden tests.
//!
//! Every collaborator trait has a mock here: notifications are captured for
//! assertion, backend data is canned at construction, and the subscriber
//! store is an in-memory map.

pub mod mock_backlog;
pub mod mock_mail;
pub mod mock_notifier;
pub mod mock_store;

pub use mock_backlog::MockBacklog;
pub use mock_mail::MockMailSender;
pub use mock_notifier::MockNotifier;
pub use mock_store::MemorySubscriberStore;

use timewarden_core::PinGenerator;

/// Pin generator returning a fixed code, for verification-flow tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPinGenerator(pub u32);

impl PinGenerator for FixedPinGenerator {
    fn next_pin(&self) -> u32 {
        self.0
    }
}
