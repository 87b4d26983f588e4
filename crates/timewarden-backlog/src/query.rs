// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WIQL query construction.

use chrono::{Duration, NaiveDate, Utc};

/// Active tasks assigned to a user.
pub fn active_work_items(user_email: &str) -> String {
    format!(
        "Select [State], [Title] From WorkItems \
         Where [Work Item Type] = 'Task' \
         And [Assigned To] = '{user_email}' \
         And [State] = 'Active' \
         Order By [State] Asc, [Changed Date] Desc"
    )
}

/// Tasks relevant to a reporting period: closed inside it, carrying completed
/// work while still open, or currently active.
///
/// The upper bound is exclusive and shifted one day past `to` so that items
/// closed any time on the end date are included.
pub fn work_items_by_date(user_email: &str, from: NaiveDate, to: Option<NaiveDate>) -> String {
    let upper = to.unwrap_or_else(|| Utc::now().date_naive()) + Duration::days(1);
    format!(
        "SELECT [System.Id], [System.WorkItemType], [System.Title], [System.AssignedTo], \
         [System.State], [System.Tags], [Microsoft.VSTS.Common.ClosedDate], \
         [Microsoft.VSTS.Scheduling.CompletedWork] \
         FROM workitems \
         WHERE [System.AssignedTo] = '{user_email}' \
         AND [System.WorkItemType] = 'Task' \
         AND ( \
           ([Microsoft.VSTS.Common.ClosedDate] >= '{from}' \
            AND [Microsoft.VSTS.Common.ClosedDate] < '{upper}') \
           OR ([Microsoft.VSTS.Scheduling.CompletedWork] > 0 AND [System.State] <> 'Closed') \
           OR ([System.State] = 'Active') \
         )",
        from = from.format("%Y-%m-%d"),
        upper = upper.format("%Y-%m-%d"),
    )
}
