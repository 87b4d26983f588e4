// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure DevOps backend accessor: WIQL queries, work-item and update
//! retrieval, and active pull-request search.

pub mod client;
pub mod dto;
pub mod query;

pub use client::DevOpsBacklog;
