// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence: connection lifecycle, embedded migrations, and the
//! subscriber store.

pub mod database;
pub mod migrations;
pub mod subscribers;

pub use database::Database;
pub use subscribers::SqliteSubscriberStore;
