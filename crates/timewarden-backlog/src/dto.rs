// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Azure DevOps REST API, mapped into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use timewarden_core::{ChangeEvent, ReviewInfo, WorkItem};

/// Response of a WIQL query: work-item references only.
#[derive(Debug, Deserialize)]
pub struct WiqlResponse {
    #[serde(rename = "workItems", default)]
    pub work_items: Vec<WorkItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct WorkItemRef {
    pub id: i64,
}

/// Generic `{"value": [...]}` collection envelope.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct WorkItemDto {
    pub id: i64,
    #[serde(default)]
    pub fields: WorkItemFields,
    #[serde(default)]
    pub relations: Vec<RelationDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkItemFields {
    #[serde(rename = "System.Title")]
    pub title: Option<String>,
    #[serde(rename = "System.State")]
    pub state: Option<String>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.OriginalEstimate")]
    pub original_estimate: Option<f64>,
    #[serde(rename = "Microsoft.VSTS.Scheduling.CompletedWork")]
    pub completed_work: Option<f64>,
    #[serde(rename = "Microsoft.VSTS.Common.ClosedDate")]
    pub closed_date: Option<DateTime<Utc>>,
    #[serde(rename = "System.ChangedDate")]
    pub changed_date: Option<DateTime<Utc>>,
}

impl From<WorkItemDto> for WorkItem {
    fn from(dto: WorkItemDto) -> Self {
        WorkItem {
            id: dto.id,
            title: dto.fields.title.unwrap_or_default(),
            state: dto.fields.state,
            estimated: dto.fields.original_estimate,
            completed: dto.fields.completed_work,
            closed_at: dto.fields.closed_date,
            changed_at: dto.fields.changed_date,
        }
    }
}

/// Link identifying an item's parent.
pub const PARENT_RELATION: &str = "System.LinkTypes.Hierarchy-Reverse";

#[derive(Debug, Deserialize)]
pub struct RelationDto {
    pub rel: String,
    pub url: String,
}

impl RelationDto {
    /// Parent id from the relation URL's trailing segment, if numeric.
    pub fn target_id(&self) -> Option<i64> {
        self.url.rsplit('/').next()?.parse().ok()
    }
}

/// One revision from a work item's update history. Only field transitions
/// matter; updates without a state change are skipped downstream.
#[derive(Debug, Deserialize)]
pub struct UpdateDto {
    #[serde(default)]
    pub fields: Option<UpdateFields>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFields {
    #[serde(rename = "System.State")]
    pub state: Option<FieldChange<String>>,
    #[serde(rename = "System.ChangedDate")]
    pub changed_date: Option<FieldChange<DateTime<Utc>>>,
}

#[derive(Debug, Deserialize)]
pub struct FieldChange<T> {
    #[serde(rename = "newValue")]
    pub new_value: Option<T>,
}

impl UpdateDto {
    /// Collapse into a change event, when the update carries a timestamp.
    pub fn into_change_event(self) -> Option<ChangeEvent> {
        let fields = self.fields?;
        let timestamp = fields.changed_date?.new_value?;
        let state = fields.state.and_then(|change| change.new_value);
        Some(ChangeEvent { timestamp, state })
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequestDto {
    #[serde(rename = "pullRequestId")]
    pub id: i64,
    pub title: String,
    #[serde(rename = "creationDate")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<IdentityDto>,
    pub repository: Option<RepositoryDto>,
}

#[derive(Debug, Deserialize)]
pub struct IdentityDto {
    #[serde(rename = "uniqueName")]
    pub unique_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryDto {
    pub name: Option<String>,
    pub project: Option<ProjectDto>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    pub name: Option<String>,
}

impl PullRequestDto {
    pub fn author_matches(&self, user_email: &str) -> bool {
        self.created_by
            .as_ref()
            .and_then(|identity| identity.unique_name.as_deref())
            .is_some_and(|name| name.eq_ignore_ascii_case(user_email))
    }

    /// Map into the domain review type, building the web URL from the
    /// organization address.
    pub fn into_review(self, base_url: &str) -> ReviewInfo {
        let project = self
            .repository
            .as_ref()
            .and_then(|repo| repo.project.as_ref())
            .and_then(|p| p.name.clone())
            .unwrap_or_default();
        let repository = self
            .repository
            .as_ref()
            .and_then(|repo| repo.name.clone())
            .unwrap_or_default();
        let web_url = format!(
            "{}/{}/_git/{}/pullrequest/{}",
            base_url.trim_end_matches('/'),
            project,
            repository,
            self.id
        );

        ReviewInfo {
            id: self.id,
            title: self.title,
            project,
            repository,
            web_url,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_item_fields_map_to_domain() {
        let raw = r#"{
            "id": 42,
            "fields": {
                "System.Title": "Fix login",
                "System.State": "Closed",
                "Microsoft.VSTS.Scheduling.OriginalEstimate": 4.0,
                "Microsoft.VSTS.Scheduling.CompletedWork": 3.5,
                "Microsoft.VSTS.Common.ClosedDate": "2026-03-04T18:00:00Z"
            }
        }"#;
        let item: WorkItem = serde_json::from_str::<WorkItemDto>(raw).unwrap().into();

        assert_eq!(item.id, 42);
        assert_eq!(item.title, "Fix login");
        assert_eq!(item.estimated, Some(4.0));
        assert_eq!(item.completed, Some(3.5));
        assert!(item.closed_at.is_some());
        assert!(item.changed_at.is_none());
    }

    #[test]
    fn update_without_state_change_still_yields_event() {
        let raw = r#"{
            "fields": {
                "System.ChangedDate": { "newValue": "2026-03-03T09:00:00Z" }
            }
        }"#;
        let event = serde_json::from_str::<UpdateDto>(raw)
            .unwrap()
            .into_change_event()
            .unwrap();
        assert!(event.state.is_none());
    }

    #[test]
    fn update_without_timestamp_is_dropped() {
        let raw = r#"{ "fields": { "System.State": { "newValue": "Active" } } }"#;
        assert!(serde_json::from_str::<UpdateDto>(raw)
            .unwrap()
            .into_change_event()
            .is_none());

        let raw = r#"{}"#;
        assert!(serde_json::from_str::<UpdateDto>(raw)
            .unwrap()
            .into_change_event()
            .is_none());
    }

    #[test]
    fn relation_target_id_parses_trailing_segment() {
        let relation = RelationDto {
            rel: PARENT_RELATION.to_string(),
            url: "https://dev.example.com/org/_apis/wit/workItems/1234".to_string(),
        };
        assert_eq!(relation.target_id(), Some(1234));

        let bad = RelationDto {
            rel: PARENT_RELATION.to_string(),
            url: "https://dev.example.com/org/_apis/wit/workItems/abc".to_string(),
        };
        assert_eq!(bad.target_id(), None);
    }

    #[test]
    fn pull_request_maps_author_and_url() {
        let raw = r#"{
            "pullRequestId": 7,
            "title": "Add caching",
            "creationDate": "2026-03-02T10:00:00Z",
            "createdBy": { "uniqueName": "Dev@Example.com" },
            "repository": { "name": "backend", "project": { "name": "Alpha" } }
        }"#;
        let dto: PullRequestDto = serde_json::from_str(raw).unwrap();
        assert!(dto.author_matches("dev@example.com"));
        assert!(!dto.author_matches("other@example.com"));

        let review = dto.into_review("https://dev.example.com/org/");
        assert_eq!(
            review.web_url,
            "https://dev.example.com/org/Alpha/_git/backend/pullrequest/7"
        );
        assert_eq!(review.project, "Alpha");
    }
}
