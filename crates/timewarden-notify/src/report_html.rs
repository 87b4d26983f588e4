// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standalone HTML rendering of a time report, sent as a chat attachment.

use timewarden_core::TimeReport;

use crate::format::{html_escape, item_url, period_label};

/// Render a full report document: one row per work item plus a totals footer.
pub fn render(report: &TimeReport, backlog_url: &str) -> String {
    let mut rows = String::new();
    let mut items: Vec<_> = report.items().to_vec();
    items.sort_by_key(|item| item.date);

    for item in &items {
        let url = item_url(backlog_url, item.id);
        rows.push_str(&format!(
            "<tr><td>{}</td><td><a href=\"{url}\">{}</a></td><td>{}</td>\
             <td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>\n",
            item.date.format("%d/%m/%Y"),
            item.id,
            html_escape(&item.title),
            item.estimated,
            item.active,
            item.completed,
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Time report {period}</title>\n\
         <style>body{{font-family:sans-serif}}table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:4px 8px;text-align:left}}</style>\n\
         </head>\n<body>\n<h1>Time report {period}</h1>\n\
         <table>\n<tr><th>Date</th><th>ID</th><th>Title</th>\
         <th>Estimated</th><th>Active</th><th>Completed</th></tr>\n\
         {rows}\
         <tr><th colspan=\"3\">Total</th><th>{est:.2}</th><th>{act:.2}</th>\
         <th>{comp:.2}</th></tr>\n\
         </table>\n\
         <p>Expected hours: {expected:.2} (hours off: {off:.2})</p>\n\
         </body>\n</html>\n",
        period = period_label(report),
        est = report.total_estimated,
        act = report.total_active,
        comp = report.total_completed,
        expected = report.expected_hours,
        off = report.hours_off,
    )
}
