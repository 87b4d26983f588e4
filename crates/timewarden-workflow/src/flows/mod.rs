// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete step logic, one module per conversational flow family.

pub mod account;
pub mod delete;
pub mod queries;
pub mod reports;
pub mod settings;
pub mod snooze;
pub mod time_off;
