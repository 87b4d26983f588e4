// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Azure DevOps REST API.
//!
//! Authenticates with a personal access token over basic auth. Every failure
//! is wrapped with the user whose query was running, so sweep logs can name
//! the affected subscriber.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use timewarden_core::{
    ActiveTasksInfo, BacklogAccessor, ChangeEvent, PendingReviewsInfo, TaskInfo, WardenError,
    WorkItem,
};

use crate::dto::{
    Collection, PullRequestDto, UpdateDto, WiqlResponse, WorkItemDto, PARENT_RELATION,
};
use crate::query;

const API_VERSION: &str = "7.0";

/// Work-item backend accessor talking to an Azure DevOps organization.
#[derive(Debug, Clone)]
pub struct DevOpsBacklog {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl DevOpsBacklog {
    /// `base_url` is the organization address, e.g.
    /// `https://dev.azure.com/acme`.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, WardenError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WardenError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    async fn run_wiql(&self, user: &str, wiql: &str) -> Result<Vec<i64>, WardenError> {
        info!(query = wiql, "executing WIQL query");
        let url = format!(
            "{}/_apis/wit/wiql?api-version={API_VERSION}&timePrecision=true",
            self.base_url
        );
        let response: WiqlResponse = self
            .send_json(user, self.client.post(&url).json(&json!({ "query": wiql })))
            .await?;
        Ok(response.work_items.into_iter().map(|w| w.id).collect())
    }

    async fn get_item(&self, user: &str, id: i64, expand: &str) -> Result<WorkItemDto, WardenError> {
        let url = format!(
            "{}/_apis/wit/workitems/{id}?$expand={expand}&api-version={API_VERSION}",
            self.base_url
        );
        self.send_json(user, self.client.get(&url)).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        user: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, WardenError> {
        let response = request
            .basic_auth("", Some(&self.access_token))
            .send()
            .await
            .map_err(|e| backlog_err(user, "request failed", e))?;

        let response = response
            .error_for_status()
            .map_err(|e| backlog_err(user, "backend returned an error status", e))?;

        response
            .json()
            .await
            .map_err(|e| backlog_err(user, "could not decode response", e))
    }
}

fn backlog_err(user: &str, message: &str, source: reqwest::Error) -> WardenError {
    WardenError::Backlog {
        user: user.to_string(),
        message: message.to_string(),
        source: Some(Box::new(source)),
    }
}

#[async_trait]
impl BacklogAccessor for DevOpsBacklog {
    async fn active_items(&self, user_email: &str) -> Result<ActiveTasksInfo, WardenError> {
        let ids = self
            .run_wiql(user_email, &query::active_work_items(user_email))
            .await?;
        let items = self.items_by_id(&ids).await?;

        let info = ActiveTasksInfo {
            user: user_email.to_string(),
            tasks: items
                .into_iter()
                .map(|item| TaskInfo {
                    id: item.id,
                    title: item.title,
                    active_hours: 0.0,
                    parent: None,
                })
                .collect(),
        };
        info!(
            user = user_email,
            active_count = info.count(),
            "active-tasks query finished"
        );
        Ok(info)
    }

    async fn items_changed_in_period(
        &self,
        user_email: &str,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<Vec<i64>, WardenError> {
        self.run_wiql(user_email, &query::work_items_by_date(user_email, from, to))
            .await
    }

    async fn items_by_id(&self, ids: &[i64]) -> Result<Vec<WorkItem>, WardenError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/_apis/wit/workitems?ids={id_list}&$expand=fields&api-version={API_VERSION}",
            self.base_url
        );
        let collection: Collection<WorkItemDto> =
            self.send_json("", self.client.get(&url)).await?;
        Ok(collection.value.into_iter().map(WorkItem::from).collect())
    }

    async fn change_log(&self, item_id: i64) -> Result<Vec<ChangeEvent>, WardenError> {
        let url = format!(
            "{}/_apis/wit/workItems/{item_id}/updates?api-version={API_VERSION}",
            self.base_url
        );
        let collection: Collection<UpdateDto> = self.send_json("", self.client.get(&url)).await?;
        Ok(collection
            .value
            .into_iter()
            .filter_map(UpdateDto::into_change_event)
            .collect())
    }

    async fn parent_of(&self, item_id: i64) -> Result<Option<WorkItem>, WardenError> {
        // A missing or unreadable parent is not an error; reports simply
        // omit the parent line.
        let Ok(item) = self.get_item("", item_id, "relations").await else {
            return Ok(None);
        };

        let Some(parent_id) = item
            .relations
            .iter()
            .find(|relation| relation.rel == PARENT_RELATION)
            .and_then(|relation| relation.target_id())
        else {
            return Ok(None);
        };

        match self.get_item("", parent_id, "fields").await {
            Ok(parent) => Ok(Some(parent.into())),
            Err(error) => {
                debug!(item_id, parent_id, %error, "parent lookup failed");
                Ok(None)
            }
        }
    }

    async fn pending_reviews(
        &self,
        user_email: &str,
        project_filters: &[String],
    ) -> Result<PendingReviewsInfo, WardenError> {
        let mut pull_requests: Vec<PullRequestDto> = Vec::new();
        for project in project_filters {
            let url = format!(
                "{}/{}/_apis/git/pullrequests?searchCriteria.status=active&api-version={API_VERSION}",
                self.base_url,
                project.trim()
            );
            let collection: Collection<PullRequestDto> =
                self.send_json(user_email, self.client.get(&url)).await?;
            pull_requests.extend(collection.value);
        }

        let mut reviews: Vec<_> = pull_requests
            .into_iter()
            .filter(|pr| pr.author_matches(user_email))
            .map(|pr| pr.into_review(&self.base_url))
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!(
            user = user_email,
            review_count = reviews.len(),
            "pull-request query finished"
        );
        Ok(PendingReviewsInfo {
            user: user_email.to_string(),
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let backlog = DevOpsBacklog::new("https://dev.azure.com/acme/", "token").unwrap();
        assert_eq!(backlog.base_url, "https://dev.azure.com/acme");
    }
}
