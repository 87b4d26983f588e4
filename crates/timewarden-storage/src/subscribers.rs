// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscriber persistence over SQLite.
//!
//! Scalar fields map to columns; structured side state (working hours,
//! workflow slot, filters, time-off ledger, alert stamps) is stored as JSON
//! text and read or written as a whole.

use async_trait::async_trait;
use rusqlite::params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use timewarden_core::{Subscriber, SubscriberStore, WardenError};

use crate::database::{map_tr_err, Database};

const COLUMNS: &str = "chat_id, email, is_verified, pin, verification_attempts, working_hours, \
                       hours_per_day, project_filters, active_workflow, snooze_until, time_off, \
                       alerts";

/// [`SubscriberStore`] implementation backed by [`Database`].
#[derive(Clone)]
pub struct SqliteSubscriberStore {
    db: Database,
}

impl SqliteSubscriberStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberStore for SqliteSubscriberStore {
    async fn get_by_id(&self, chat_id: &str) -> Result<Option<Subscriber>, WardenError> {
        let chat_id = chat_id.to_string();
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {COLUMNS} FROM subscribers WHERE chat_id = ?1"
                ))?;
                let result = stmt.query_row(params![chat_id], row_to_subscriber);
                match result {
                    Ok(subscriber) => Ok(Some(subscriber)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn upsert(&self, subscriber: &Subscriber) -> Result<(), WardenError> {
        debug!(chat_id = %subscriber.chat_id, "persisting subscriber");
        let row = SubscriberRow::try_from(subscriber)?;
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO subscribers (chat_id, email, is_verified, pin, \
                     verification_attempts, working_hours, hours_per_day, project_filters, \
                     active_workflow, snooze_until, time_off, alerts)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                     ON CONFLICT(chat_id) DO UPDATE SET
                       email = excluded.email,
                       is_verified = excluded.is_verified,
                       pin = excluded.pin,
                       verification_attempts = excluded.verification_attempts,
                       working_hours = excluded.working_hours,
                       hours_per_day = excluded.hours_per_day,
                       project_filters = excluded.project_filters,
                       active_workflow = excluded.active_workflow,
                       snooze_until = excluded.snooze_until,
                       time_off = excluded.time_off,
                       alerts = excluded.alerts",
                    params![
                        row.chat_id,
                        row.email,
                        row.is_verified,
                        row.pin,
                        row.verification_attempts,
                        row.working_hours,
                        row.hours_per_day,
                        row.project_filters,
                        row.active_workflow,
                        row.snooze_until,
                        row.time_off,
                        row.alerts,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn list_all(&self) -> Result<Vec<Subscriber>, WardenError> {
        self.db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {COLUMNS} FROM subscribers ORDER BY chat_id"
                ))?;
                let rows = stmt.query_map([], row_to_subscriber)?;
                let mut subscribers = Vec::new();
                for row in rows {
                    subscribers.push(row?);
                }
                Ok(subscribers)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, chat_id: &str) -> Result<(), WardenError> {
        let chat_id = chat_id.to_string();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute("DELETE FROM subscribers WHERE chat_id = ?1", [chat_id])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Column-shaped subscriber, all JSON already rendered.
struct SubscriberRow {
    chat_id: String,
    email: String,
    is_verified: bool,
    pin: u32,
    verification_attempts: u32,
    working_hours: Option<String>,
    hours_per_day: u32,
    project_filters: String,
    active_workflow: Option<String>,
    snooze_until: Option<String>,
    time_off: String,
    alerts: String,
}

impl TryFrom<&Subscriber> for SubscriberRow {
    type Error = WardenError;

    fn try_from(sub: &Subscriber) -> Result<Self, WardenError> {
        Ok(Self {
            chat_id: sub.chat_id.clone(),
            email: sub.email.clone(),
            is_verified: sub.is_verified,
            pin: sub.pin,
            verification_attempts: sub.verification_attempts,
            working_hours: sub.working_hours.map(|h| to_json(&h)).transpose()?,
            hours_per_day: sub.hours_per_day,
            project_filters: to_json(&sub.project_filters)?,
            active_workflow: sub
                .active_workflow
                .as_ref()
                .map(to_json)
                .transpose()?,
            snooze_until: sub.snooze_until.map(|t| to_json(&t)).transpose()?,
            time_off: to_json(&sub.time_off)?,
            alerts: to_json(&sub.alerts)?,
        })
    }
}

fn row_to_subscriber(row: &rusqlite::Row<'_>) -> rusqlite::Result<Subscriber> {
    Ok(Subscriber {
        chat_id: row.get(0)?,
        email: row.get(1)?,
        is_verified: row.get(2)?,
        pin: row.get(3)?,
        verification_attempts: row.get(4)?,
        working_hours: from_json_opt(row, 5)?,
        hours_per_day: row.get(6)?,
        project_filters: from_json(row, 7)?,
        active_workflow: from_json_opt(row, 8)?,
        snooze_until: from_json_opt(row, 9)?,
        time_off: from_json(row, 10)?,
        alerts: from_json(row, 11)?,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, WardenError> {
    serde_json::to_string(value).map_err(|e| WardenError::Storage {
        source: Box::new(e),
    })
}

fn from_json<T: DeserializeOwned>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn from_json_opt<T: DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};
    use tempfile::tempdir;
    use timewarden_core::{TimeOffEntry, Workflow, WorkflowKind, WorkingHours};

    async fn setup() -> (SqliteSubscriberStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (SqliteSubscriberStore::new(db), dir)
    }

    fn full_subscriber() -> Subscriber {
        let mut sub = Subscriber::new("42", 5555);
        sub.email = "dev@example.com".into();
        sub.is_verified = true;
        sub.working_hours = Some(WorkingHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        });
        sub.hours_per_day = 6;
        sub.project_filters = vec!["Alpha".into(), "Beta".into()];
        sub.active_workflow = Some(Workflow::new(WorkflowKind::Settings, Utc::now()));
        sub.snooze_until = Some(Utc::now() + Duration::minutes(30));
        sub.time_off.push(TimeOffEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            hours_off: 8,
        });
        sub.alerts.no_active_task = Some(Utc::now());
        sub
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrip_every_field() {
        let (store, _dir) = setup().await;
        let sub = full_subscriber();

        store.upsert(&sub).await.unwrap();
        let loaded = store.get_by_id("42").await.unwrap().unwrap();
        assert_eq!(loaded, sub);
    }

    #[tokio::test]
    async fn upsert_overwrites_in_place() {
        let (store, _dir) = setup().await;
        let mut sub = full_subscriber();
        store.upsert(&sub).await.unwrap();

        sub.active_workflow = None;
        sub.verification_attempts = 2;
        store.upsert(&sub).await.unwrap();

        let loaded = store.get_by_id("42").await.unwrap().unwrap();
        assert!(loaded.active_workflow.is_none());
        assert_eq!(loaded.verification_attempts, 2);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (store, _dir) = setup().await;
        assert!(store.get_by_id("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_is_ordered_by_chat_id() {
        let (store, _dir) = setup().await;
        for id in ["3", "1", "2"] {
            store.upsert(&Subscriber::new(id, 1000)).await.unwrap();
        }
        let all = store.list_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.chat_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (store, _dir) = setup().await;
        store.upsert(&full_subscriber()).await.unwrap();
        store.delete("42").await.unwrap();
        assert!(store.get_by_id("42").await.unwrap().is_none());
    }
}
