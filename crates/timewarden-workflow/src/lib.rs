// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational workflow engine: per-kind step logic, the shared step
//! execution contract, and the command router that drives both.

pub mod context;
pub mod engine;
pub mod flows;
pub mod router;

pub use context::WorkflowContext;
pub use router::CommandRouter;
