// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proactive alerting: pure cooldown rules plus the background sweep that
//! applies them to every subscriber.

pub mod cooldown;
pub mod monitor;

pub use cooldown::{evaluate, AlertKind, ALERT_COOLDOWN_MINUTES};
pub use monitor::MonitoringService;
