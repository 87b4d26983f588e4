// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./timewarden.toml` > `~/.config/timewarden/timewarden.toml`
//! > `/etc/timewarden/timewarden.toml` with environment variable overrides via
//! `TIMEWARDEN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WardenConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/timewarden/timewarden.toml` (system-wide)
/// 3. `~/.config/timewarden/timewarden.toml` (user XDG config)
/// 4. `./timewarden.toml` (local directory)
/// 5. `TIMEWARDEN_*` environment variables
pub fn load_config() -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::file("/etc/timewarden/timewarden.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("timewarden/timewarden.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("timewarden.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (defaults + string only).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TIMEWARDEN_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("TIMEWARDEN_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("bot_", "bot.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("backlog_", "backlog.", 1)
            .replacen("mail_", "mail.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("monitoring_", "monitoring.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.bot.name, "timewarden");
        assert_eq!(config.bot.log_level, "info");
        assert_eq!(config.monitoring.interval_minutes, 10);
        assert_eq!(config.mail.smtp_port, 587);
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn toml_values_override_defaults() {
        let config = load_config_from_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [backlog]
            base_url = "https://dev.azure.com/acme"
            access_token = "pat"
            email_domain = "@acme.com"

            [monitoring]
            interval_minutes = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(
            config.backlog.base_url.as_deref(),
            Some("https://dev.azure.com/acme")
        );
        assert_eq!(config.backlog.email_domain.as_deref(), Some("@acme.com"));
        assert_eq!(config.monitoring.interval_minutes, 20);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [telegram]
            bot_tokne = "typo"
            "#,
        );
        assert!(result.is_err(), "typo'd key should fail extraction");
    }
}
