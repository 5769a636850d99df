use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::episodes;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = episodes)]
pub struct EpisodeEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub series_id: i64,
    pub title: String,
    pub season: Option<i32>,
    pub episode_num: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
