// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timewarden - a conversational time-tracking assistant.
//!
//! Binary entry point: CLI parsing, config loading, and command dispatch.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use timewarden_config::WardenConfig;

/// Timewarden - a conversational time-tracking assistant.
#[derive(Parser, Debug)]
#[command(name = "timewarden", version, about, long_about = None)]
struct Cli {
    /// Path to a config file; defaults to the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot: Telegram listener plus the monitoring loop.
    Serve,
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("timewarden: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            init_tracing(&config.bot.log_level);
            if let Err(e) = serve::run_serve(config).await {
                error!(error = %e, "serve failed");
                eprintln!("timewarden: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match render_config(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("timewarden: {e}");
                std::process::exit(1);
            }
        },
        None => {
            eprintln!("timewarden: use --help for available commands");
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<WardenConfig, figment::Error> {
    match path {
        Some(path) => timewarden_config::load_config_from_path(path),
        None => timewarden_config::load_config(),
    }
}

/// Resolved config as TOML with secret values masked.
fn render_config(config: &WardenConfig) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    for secret in [
        &mut shown.telegram.bot_token,
        &mut shown.backlog.access_token,
        &mut shown.mail.password,
    ] {
        if secret.is_some() {
            *secret = Some("<redacted>".into());
        }
    }
    toml::to_string_pretty(&shown)
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("timewarden={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_masks_secrets() {
        let config = timewarden_config::load_config_from_str(
            r#"
            [telegram]
            bot_token = "123:abc"

            [backlog]
            access_token = "pat"
            "#,
        )
        .unwrap();

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("123:abc"));
        assert!(!rendered.contains("pat\""));
        assert!(rendered.contains("<redacted>"));
    }
}
