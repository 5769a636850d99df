use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::stream_profiles},
};
use domain::{
    entities::stream_profiles::StreamProfileEntity,
    repositories::stream_profiles::StreamProfileRepository,
};

pub struct StreamProfilePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl StreamProfilePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StreamProfileRepository for StreamProfilePostgres {
    async fn find_owned(
        &self,
        user_id: Uuid,
        profile_id: i64,
    ) -> Result<Option<StreamProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = stream_profiles::table
            .filter(stream_profiles::id.eq(profile_id))
            .filter(stream_profiles::user_id.eq(user_id))
            .select(StreamProfileEntity::as_select())
            .first::<StreamProfileEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_owned(&self, user_id: Uuid) -> Result<Vec<StreamProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = stream_profiles::table
            .filter(stream_profiles::user_id.eq(user_id))
            .select(StreamProfileEntity::as_select())
            .order(stream_profiles::name.asc())
            .load::<StreamProfileEntity>(&mut conn)?;

        Ok(results)
    }
}
