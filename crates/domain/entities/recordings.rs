use chrono::{DateTime, Utc};
use diesel::{AsChangeset, prelude::*};
use uuid::Uuid;

use crate::infra::db::postgres::schema::recordings;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = recordings)]
pub struct RecordingEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub recordable_type: String,
    pub recordable_id: i64,
    pub title: String,
    pub recurrence: String,
    pub stream_profile_id: i64,
    pub status: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub pre_padding_seconds: i32,
    pub post_padding_seconds: i32,
    pub max_retries: i32,
    pub retry_count: i32,
    pub duration_seconds: Option<i32>,
    pub file_size_bytes: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row written by the request resolver. `retry_count` and the executor-owned
/// columns are left to their database defaults.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = recordings)]
pub struct InsertRecordingEntity {
    pub user_id: Uuid,
    pub recordable_type: String,
    pub recordable_id: i64,
    pub title: String,
    pub recurrence: String,
    pub stream_profile_id: i64,
    pub status: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub pre_padding_seconds: i32,
    pub post_padding_seconds: i32,
    pub max_retries: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, AsChangeset)]
#[diesel(table_name = recordings)]
pub struct UpdateRecordingEntity {
    pub title: Option<String>,
    pub recurrence: Option<String>,
    pub stream_profile_id: Option<i64>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub pre_padding_seconds: Option<i32>,
    pub post_padding_seconds: Option<i32>,
    pub max_retries: Option<i32>,
    pub updated_at: Option<DateTime<Utc>>,
}
