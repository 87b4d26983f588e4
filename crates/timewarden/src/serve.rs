// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `timewarden serve` command implementation.
//!
//! Wires the full bot: SQLite subscriber store, Azure DevOps backlog access,
//! the Telegram transport and listener, SMTP verification mail, the workflow
//! router, and the monitoring loop. Runs until interrupted.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use timewarden_alerts::MonitoringService;
use timewarden_backlog::DevOpsBacklog;
use timewarden_config::{validate_for_serve, WardenConfig};
use timewarden_core::{
    MailSender, Notifier, RandomPinGenerator, SubscriberStore, WardenError,
};
use timewarden_mail::SmtpMailSender;
use timewarden_notify::BotNotifier;
use timewarden_reporting::ReportingService;
use timewarden_storage::{Database, SqliteSubscriberStore};
use timewarden_telegram::{TelegramListener, TelegramTransport};
use timewarden_workflow::{CommandRouter, WorkflowContext};

/// Stand-in sender for setups without an SMTP relay. Mail content never
/// reaches the user; the recipient is logged so operators can see the gap.
struct DisabledMailSender;

#[async_trait]
impl MailSender for DisabledMailSender {
    async fn send(&self, subject: &str, _body: &str, to_address: &str) -> Result<(), WardenError> {
        warn!(
            to = to_address,
            subject, "mail delivery is disabled (mail.smtp_host not set); dropping message"
        );
        Ok(())
    }
}

pub async fn run_serve(config: WardenConfig) -> Result<(), WardenError> {
    validate_for_serve(&config)?;
    info!(bot = %config.bot.name, "starting timewarden serve");

    let base_url = config
        .backlog
        .base_url
        .as_deref()
        .ok_or_else(|| WardenError::Config("backlog.base_url is required".into()))?;
    let access_token = config
        .backlog
        .access_token
        .as_deref()
        .ok_or_else(|| WardenError::Config("backlog.access_token is required".into()))?;

    let database = Database::open(&config.storage.database_path).await?;
    let store: Arc<dyn SubscriberStore> = Arc::new(SqliteSubscriberStore::new(database));

    let transport = TelegramTransport::new(&config.telegram)?;
    let bot = transport.bot();
    let notifier: Arc<dyn Notifier> = Arc::new(BotNotifier::new(Arc::new(transport), base_url));

    let backlog = Arc::new(DevOpsBacklog::new(base_url, access_token)?);
    let reporting = Arc::new(ReportingService::new(notifier.clone(), backlog.clone()));

    let mail: Arc<dyn MailSender> = if config.mail.smtp_host.is_some() {
        Arc::new(SmtpMailSender::new(&config.mail)?)
    } else {
        warn!("mail.smtp_host not set; verification mail delivery is disabled");
        Arc::new(DisabledMailSender)
    };

    let ctx = WorkflowContext {
        notifier: notifier.clone(),
        backlog: backlog.clone(),
        store: store.clone(),
        mail,
        pins: Arc::new(RandomPinGenerator),
        reporting: reporting.clone(),
        email_domain: config.backlog.email_domain.clone(),
    };
    let router = Arc::new(CommandRouter::new(ctx));

    let listener = TelegramListener::new(bot, router);
    let monitor = MonitoringService::new(notifier, backlog, reporting, store);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                shutdown.cancel();
            }
        });
    }

    tokio::join!(
        listener.run(shutdown.clone()),
        monitor.run(config.monitoring.interval_minutes, shutdown.clone()),
    );

    info!("timewarden stopped");
    Ok(())
}
