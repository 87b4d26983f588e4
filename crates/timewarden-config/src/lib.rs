// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Timewarden bot.
//!
//! Layered TOML + environment loading lives in [`loader`]; the typed model
//! lives in [`model`]. [`validate_for_serve`] checks the fields that are
//! optional at load time but required to actually run the bot.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::WardenConfig;

use timewarden_core::WardenError;

/// Validate the settings the `serve` command cannot run without.
///
/// Config loading itself is lenient so that auxiliary commands work with a
/// partial config; serving requires transport and backend credentials.
pub fn validate_for_serve(config: &WardenConfig) -> Result<(), WardenError> {
    let mut missing = Vec::new();

    if config.telegram.bot_token.is_none() {
        missing.push("telegram.bot_token");
    }
    if config.backlog.base_url.is_none() {
        missing.push("backlog.base_url");
    }
    if config.backlog.access_token.is_none() {
        missing.push("backlog.access_token");
    }
    if config.backlog.email_domain.is_none() {
        missing.push("backlog.email_domain");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WardenError::Config(format!(
            "missing required settings: {}",
            missing.join(", ")
        )))
    }
}
