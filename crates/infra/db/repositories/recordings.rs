use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, dsl::count_star, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::{
        postgres::{
            postgres_connection::PgPoolSquad,
            schema::{recordings, stream_profiles},
        },
        repositories::contains_pattern,
    },
};
use domain::{
    entities::recordings::{InsertRecordingEntity, RecordingEntity, UpdateRecordingEntity},
    repositories::recordings::RecordingRepository,
    value_objects::{
        enums::{recording_statuses::RecordingStatus, sort_order::SortOrder},
        recordings::{ListRecordingsFilter, RecordingSortField, RecordingWithProfile},
    },
};

pub struct RecordingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RecordingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn with_profile(
    (recording, stream_profile_name): (RecordingEntity, Option<String>),
) -> RecordingWithProfile {
    RecordingWithProfile {
        recording,
        stream_profile_name,
    }
}

#[async_trait]
impl RecordingRepository for RecordingPostgres {
    async fn insert(
        &self,
        insert_recording_entity: InsertRecordingEntity,
    ) -> Result<RecordingEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(recordings::table)
            .values(&insert_recording_entity)
            .returning(RecordingEntity::as_returning())
            .get_result::<RecordingEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_owned(
        &self,
        user_id: Uuid,
        recording_id: i64,
    ) -> Result<Option<RecordingWithProfile>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = recordings::table
            .left_join(
                stream_profiles::table.on(recordings::stream_profile_id.eq(stream_profiles::id)),
            )
            .filter(recordings::id.eq(recording_id))
            .filter(recordings::user_id.eq(user_id))
            .select((RecordingEntity::as_select(), stream_profiles::name.nullable()))
            .first::<(RecordingEntity, Option<String>)>(&mut conn)
            .optional()?;

        Ok(result.map(with_profile))
    }

    async fn list_owned(
        &self,
        user_id: Uuid,
        filter: ListRecordingsFilter,
    ) -> Result<Vec<RecordingWithProfile>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = recordings::table
            .left_join(
                stream_profiles::table.on(recordings::stream_profile_id.eq(stream_profiles::id)),
            )
            .filter(recordings::user_id.eq(user_id))
            .select((RecordingEntity::as_select(), stream_profiles::name.nullable()))
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(recordings::status.eq(status.to_string()));
        }

        if let Some(recordable_type) = filter.recordable_type {
            query = query.filter(recordings::recordable_type.eq(recordable_type.to_string()));
        }

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query = query.filter(recordings::title.ilike(pattern));
        }

        query = match (filter.sort_by, filter.sort_order) {
            (RecordingSortField::ScheduledStart, SortOrder::Asc) => {
                query.order(recordings::scheduled_start.asc())
            }
            (RecordingSortField::ScheduledStart, SortOrder::Desc) => {
                query.order(recordings::scheduled_start.desc())
            }
            (RecordingSortField::ScheduledEnd, SortOrder::Asc) => {
                query.order(recordings::scheduled_end.asc())
            }
            (RecordingSortField::ScheduledEnd, SortOrder::Desc) => {
                query.order(recordings::scheduled_end.desc())
            }
            (RecordingSortField::Title, SortOrder::Asc) => query.order(recordings::title.asc()),
            (RecordingSortField::Title, SortOrder::Desc) => query.order(recordings::title.desc()),
            (RecordingSortField::CreatedAt, SortOrder::Asc) => {
                query.order(recordings::created_at.asc())
            }
            (RecordingSortField::CreatedAt, SortOrder::Desc) => {
                query.order(recordings::created_at.desc())
            }
        };
        query = query.then_order_by(recordings::id.desc());

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let results = query.load::<(RecordingEntity, Option<String>)>(&mut conn)?;

        Ok(results.into_iter().map(with_profile).collect())
    }

    async fn update_owned(
        &self,
        user_id: Uuid,
        recording_id: i64,
        allowed_statuses: Vec<RecordingStatus>,
        update_recording_entity: UpdateRecordingEntity,
    ) -> Result<Option<RecordingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let allowed_statuses: Vec<String> =
            allowed_statuses.iter().map(ToString::to_string).collect();

        let result = update(recordings::table)
            .filter(recordings::id.eq(recording_id))
            .filter(recordings::user_id.eq(user_id))
            .filter(recordings::status.eq_any(allowed_statuses))
            .set(&update_recording_entity)
            .returning(RecordingEntity::as_returning())
            .get_result::<RecordingEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete_owned(
        &self,
        user_id: Uuid,
        recording_ids: Vec<i64>,
        protected_status: RecordingStatus,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(recordings::table)
            .filter(recordings::user_id.eq(user_id))
            .filter(recordings::id.eq_any(recording_ids))
            .filter(recordings::status.ne(protected_status.to_string()))
            .execute(&mut conn)?;

        Ok(deleted)
    }

    async fn count_by_status(&self, user_id: Uuid, status: RecordingStatus) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = recordings::table
            .filter(recordings::user_id.eq(user_id))
            .filter(recordings::status.eq(status.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }
}
