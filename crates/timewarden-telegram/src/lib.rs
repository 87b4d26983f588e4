// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram adapter for the Timewarden bot: the teloxide transport plus the
//! long-polling listener that drives the command router.

pub mod listener;
pub mod transport;

pub use listener::TelegramListener;
pub use transport::TelegramTransport;
