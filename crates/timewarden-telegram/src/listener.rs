// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-polling listener feeding inbound messages into the command router.

use std::sync::Arc;

use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use timewarden_workflow::CommandRouter;

pub struct TelegramListener {
    bot: Bot,
    router: Arc<CommandRouter>,
}

impl TelegramListener {
    pub fn new(bot: Bot, router: Arc<CommandRouter>) -> Self {
        Self { bot, router }
    }

    /// Poll for updates until the shutdown token fires.
    ///
    /// Router failures are logged per message and never stop the listener.
    pub async fn run(self, shutdown: CancellationToken) {
        let router = self.router.clone();
        let handler = Update::filter_message().endpoint(move |msg: Message| {
            let router = router.clone();
            async move {
                let Some(text) = msg.text() else {
                    return respond(());
                };
                let chat_id = msg.chat.id.0.to_string();
                if let Err(error) = router.handle_message(&chat_id, text).await {
                    error!(chat_id, %error, "message handling failed");
                }
                respond(())
            }
        });

        info!("starting Telegram long polling");
        let mut dispatcher = Dispatcher::builder(self.bot, handler)
            .default_handler(|_| async {})
            .build();
        let token = dispatcher.shutdown_token();

        tokio::select! {
            () = dispatcher.dispatch() => {}
            () = shutdown.cancelled() => {
                info!("stopping Telegram listener");
                if let Ok(stopped) = token.shutdown() {
                    stopped.await;
                }
            }
        }
    }
}
