// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bot's message surface.
//!
//! Every user-visible text lives here, composed on top of the transport
//! trait. Workflows and the monitor never format messages themselves.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use timewarden_core::{
    ActiveTasksInfo, ChatTransport, Notifier, PendingReviewsInfo, ReviewInfo, Subscriber,
    TaskInfo, TextFormat, TimeReport, WardenError, WorkItem,
};

use crate::format::{
    anomalous_days, html_escape, item_url, period_label, wrap_title, MAX_TITLE_LENGTH,
};
use crate::report_html;

const REQUEST_EMAIL_MESSAGE: &str =
    "I'm here to help you track your time. First, let me know your work email address.";

pub struct BotNotifier {
    transport: Arc<dyn ChatTransport>,
    backlog_url: String,
}

impl BotNotifier {
    pub fn new(transport: Arc<dyn ChatTransport>, backlog_url: &str) -> Self {
        Self {
            transport,
            backlog_url: backlog_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send_html(&self, chat_id: &str, text: &str) -> Result<(), WardenError> {
        self.transport
            .send_text(chat_id, text, TextFormat::Html)
            .await
    }

    fn item_link(&self, id: i64) -> String {
        format!("<a href=\"{}\">{id}</a>", item_url(&self.backlog_url, id))
    }

    fn task_line(&self, task: &TaskInfo) -> String {
        let mut line = format!(
            "• {}: {} (Active: {:.2} hs)",
            self.item_link(task.id),
            html_escape(&task.title),
            task.active_hours,
        );
        if let Some(parent) = &task.parent {
            line.push_str(&format!(
                "\nParent: {}: {}",
                self.item_link(parent.id),
                html_escape(&parent.title),
            ));
        }
        line
    }

    fn review_line(review: &ReviewInfo) -> String {
        format!(
            "• <a href=\"{}\">PR {}</a>: {} ({}/{})",
            review.web_url,
            review.id,
            html_escape(&review.title),
            html_escape(&review.project),
            html_escape(&review.repository),
        )
    }

    fn stats_table(report: &TimeReport) -> String {
        let mut text = format!("📅 Your stats for period: {}\n<pre>\n", period_label(report));
        text.push_str("----------------------------\n");
        text.push_str("| Metric          | Value  |\n");
        text.push_str("----------------------------\n");
        text.push_str(&format!("| Estimated Hours | {:6.2} |\n", report.total_estimated));
        text.push_str(&format!("| Completed Hours | {:6.2} |\n", report.total_completed));
        text.push_str(&format!("| Active Hours    | {:6.2} |\n", report.total_active));
        text.push_str(&format!("| Expected Hours  | {:6.2} |\n", report.expected_hours));
        text.push_str(&format!("| Hours off       | {:6.2} |\n", report.hours_off));
        text.push_str("----------------------------\n</pre>");
        text
    }
}

#[async_trait]
impl Notifier for BotNotifier {
    async fn respond(&self, chat_id: &str, text: &str) -> Result<(), WardenError> {
        self.transport
            .send_text(chat_id, text, TextFormat::Plain)
            .await
    }

    async fn typing(&self, chat_id: &str) -> Result<(), WardenError> {
        self.transport.send_typing(chat_id).await
    }

    async fn request_email(&self, chat_id: &str) -> Result<(), WardenError> {
        self.respond(chat_id, REQUEST_EMAIL_MESSAGE).await
    }

    async fn incorrect_email(&self, chat_id: &str) -> Result<(), WardenError> {
        self.respond(chat_id, "Incorrect email address").await
    }

    async fn email_updated(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        let text = format!(
            "Email address is set to {}, but is not yet verified.\n\
             Please check your mailbox and send the PIN to this chat.",
            subscriber.email,
        );
        self.respond(&subscriber.chat_id, &text).await
    }

    async fn account_verified(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.respond(
            &subscriber.chat_id,
            "Your account is verified. Now you are able to request reports.",
        )
        .await
    }

    async fn could_not_verify(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        self.respond(&subscriber.chat_id, "Your account could not be verified.")
            .await
    }

    async fn account_info(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        let projects = if subscriber.project_filters.is_empty() {
            "(all)".to_string()
        } else {
            subscriber.project_filters.join(",")
        };
        let working_hours = match &subscriber.working_hours {
            Some(hours) => format!(
                "{}-{}",
                hours.start.format("%H:%M"),
                hours.end.format("%H:%M")
            ),
            None => "n/a".to_string(),
        };

        let mut time_off = subscriber.time_off.clone();
        time_off.sort_by_key(|entry| entry.date);
        let time_off_rows = if time_off.is_empty() {
            "n/a".to_string()
        } else {
            time_off
                .iter()
                .map(|entry| format!("{} | {:2}", entry.date.format("%d/%m/%Y"), entry.hours_off))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let text = format!(
            "Chat id: {}\n\
             Email: {}\n\
             Projects: {}\n\
             Working hours (UTC): {}\n\
             Is account verified: {}\n\
             Hours per day: {}\n\
             <b>Time off:</b>\n<pre>Date       | Hours\n{}</pre>",
            subscriber.chat_id,
            html_escape(&subscriber.email),
            html_escape(&projects),
            working_hours,
            subscriber.is_verified,
            subscriber.effective_hours_per_day(),
            time_off_rows,
        );
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn no_active_tasks(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        let text = "⚠️ <b>Alert!</b> ⚠️\n\
                    No active tasks during working hours.\n\
                    <b>You are working for free!</b> 😱";
        self.send_html(&subscriber.chat_id, text).await
    }

    async fn active_task_outside_of_working_hours(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        let mut text = String::from(
            "🕒 <b>Active task outside of working hours!</b> 🕒\n\
             Doing some overtime, hah? 😉\n\n<b>Tasks:</b>\n",
        );
        for task in &info.tasks {
            text.push_str(&self.task_line(task));
            text.push('\n');
        }
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn more_than_single_task_is_active(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        let mut text =
            String::from("🚨 <b>More than one active task at the same time!</b> 🚨\n<b>Tasks:</b>\n");
        for task in &info.tasks {
            text.push_str(&self.task_line(task));
            text.push('\n');
        }
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn review_reminder(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError> {
        if !info.has_pending_reviews() {
            return Ok(());
        }

        let plural = if info.count() == 1 { "" } else { "s" };
        let mut text = format!(
            "🔔 <b>Review reminder!</b> 🔔\n\
             You have <b>{}</b> open pull request{plural}.\n\n",
            info.count(),
        );
        for review in &info.reviews {
            text.push_str(&Self::review_line(review));
            text.push('\n');
        }
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn active_tasks(
        &self,
        subscriber: &Subscriber,
        info: &ActiveTasksInfo,
    ) -> Result<(), WardenError> {
        let plural = if info.count() == 1 { "" } else { "s" };
        let mut text = format!("ℹ You have <b>{}</b> active task{plural}.\n", info.count());
        for task in &info.tasks {
            text.push_str(&self.task_line(task));
            text.push('\n');
        }
        debug!(chat_id = %subscriber.chat_id, count = info.count(), "active tasks");
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn pending_reviews(
        &self,
        subscriber: &Subscriber,
        info: &PendingReviewsInfo,
    ) -> Result<(), WardenError> {
        let plural = if info.count() == 1 { "" } else { "s" };
        let mut text = format!(
            "ℹ You have <b>{}</b> active pull request{plural}.\n",
            info.count(),
        );
        for review in &info.reviews {
            text.push_str(&Self::review_line(review));
            text.push('\n');
        }
        self.send_html(&subscriber.chat_id, &text).await
    }

    async fn time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
    ) -> Result<(), WardenError> {
        let document = report_html::render(report, &self.backlog_url);
        self.transport
            .send_document(
                &subscriber.chat_id,
                document.into_bytes(),
                "report.html",
                "Your report.",
            )
            .await?;

        self.send_html(&subscriber.chat_id, &Self::stats_table(report))
            .await?;

        if report.start != report.end {
            let target = subscriber.effective_hours_per_day();
            let days = anomalous_days(report, target);
            if !days.is_empty() {
                let mut text = format!("<pre>\n⚠️ Anomalous days (≠{target}h):\n");
                text.push_str("----------------------------\n");
                for (date, hours) in days {
                    text.push_str(&format!("- {}: {hours:.2}h\n", date.format("%a %d/%m")));
                }
                text.push_str("</pre>");
                self.send_html(&subscriber.chat_id, &text).await?;
            }
        }
        Ok(())
    }

    async fn detailed_time_report(
        &self,
        subscriber: &Subscriber,
        report: &TimeReport,
        threshold: f64,
        include_summary: bool,
    ) -> Result<(), WardenError> {
        let mut items: Vec<_> = report.items().to_vec();
        items.sort_by_key(|item| item.date);

        let mut text = format!(
            "<b>Tasks for period {}</b>\n\n<pre>\n",
            period_label(report)
        );
        text.push_str("Date  | ID     | Title                | A    | C    \n");
        text.push_str("------|--------|----------------------|------|------\n");

        let mut links: Vec<String> = Vec::new();
        for item in &items {
            let link = format!(
                "<a href=\"{}\">Task {} - {}</a>",
                item_url(&self.backlog_url, item.id),
                item.id,
                html_escape(&item.title),
            );
            if !links.contains(&link) {
                links.push(link);
            }

            let flag = if (item.active - item.completed).abs() > threshold {
                " !"
            } else {
                ""
            };
            let title_lines = wrap_title(&item.title, MAX_TITLE_LENGTH);
            text.push_str(&format!(
                "{} | {:<6} | {:<width$} | {:4.2} | {:4.2}{flag}\n",
                item.date.format("%d/%m"),
                item.id,
                html_escape(&title_lines[0]),
                item.active,
                item.completed,
                width = MAX_TITLE_LENGTH,
            ));
            for extra in &title_lines[1..] {
                text.push_str(&format!(
                    "      |        | {:<width$} |      |      \n",
                    html_escape(extra),
                    width = MAX_TITLE_LENGTH,
                ));
            }
        }
        text.push_str("------|--------|----------------------|------|------\n");
        text.push_str(&format!(
            "      |        | {:<width$} | {:4.2} | {:4.2}\n</pre>\n",
            "",
            report.total_active,
            report.total_completed,
            width = MAX_TITLE_LENGTH,
        ));

        text.push_str("<b>Links to tasks:</b>\n");
        for link in &links {
            text.push_str(link);
            text.push('\n');
        }
        self.send_html(&subscriber.chat_id, &text).await?;

        if include_summary {
            let summary = format!(
                "<b>Estimated Hours:</b> {:.2}\n\
                 <b>Completed Hours:</b> {:.2}\n\
                 <b>Active Hours:</b> {:.2}\n\
                 <b>Expected Hours:</b> {:.2}",
                report.total_estimated,
                report.total_completed,
                report.total_active,
                report.expected_hours,
            );
            self.send_html(&subscriber.chat_id, &summary).await?;
        }
        Ok(())
    }

    async fn story_info(
        &self,
        subscriber: &Subscriber,
        item: &WorkItem,
        active_hours: f64,
        parent: Option<&WorkItem>,
    ) -> Result<(), WardenError> {
        let mut text = format!(
            "<b>Work item {}</b>: {}\n\
             State: {}\n\
             Estimated: {:.2} h\n\
             Completed: {:.2} h\n\
             Active: {active_hours:.2} h",
            self.item_link(item.id),
            html_escape(&item.title),
            item.state.as_deref().unwrap_or("n/a"),
            item.estimated.unwrap_or(0.0),
            item.completed.unwrap_or(0.0),
        );
        if let Some(parent) = parent {
            text.push_str(&format!(
                "\nParent: {}: {}",
                self.item_link(parent.id),
                html_escape(&parent.title),
            ));
        }
        self.send_html(&subscriber.chat_id, &text).await
    }
}
