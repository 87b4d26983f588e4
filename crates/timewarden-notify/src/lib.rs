// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message composition for the Timewarden bot, layered over the chat
//! transport trait.

pub mod format;
pub mod notifier;
pub mod report_html;

pub use notifier::BotNotifier;
