use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::channels;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = channels)]
pub struct ChannelEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub playlist_id: i64,
    pub group_id: Option<i64>,
    pub title: String,
    pub stream_icon: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
