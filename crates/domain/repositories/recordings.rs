use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::recordings::{InsertRecordingEntity, RecordingEntity, UpdateRecordingEntity},
    value_objects::{
        enums::recording_statuses::RecordingStatus,
        recordings::{ListRecordingsFilter, RecordingWithProfile},
    },
};

#[async_trait]
#[automock]
pub trait RecordingRepository {
    async fn insert(&self, insert_recording_entity: InsertRecordingEntity)
    -> Result<RecordingEntity>;

    async fn find_owned(&self, user_id: Uuid, recording_id: i64)
    -> Result<Option<RecordingWithProfile>>;

    async fn list_owned(
        &self,
        user_id: Uuid,
        filter: ListRecordingsFilter,
    ) -> Result<Vec<RecordingWithProfile>>;

    /// Applies the changeset only while the row is in one of `allowed_statuses`.
    /// Returns `None` when no row matched.
    async fn update_owned(
        &self,
        user_id: Uuid,
        recording_id: i64,
        allowed_statuses: Vec<RecordingStatus>,
        update_recording_entity: UpdateRecordingEntity,
    ) -> Result<Option<RecordingEntity>>;

    /// Deletes the given rows unless they are in `protected_status`.
    /// Returns the number of rows removed.
    async fn delete_owned(
        &self,
        user_id: Uuid,
        recording_ids: Vec<i64>,
        protected_status: RecordingStatus,
    ) -> Result<usize>;

    async fn count_by_status(&self, user_id: Uuid, status: RecordingStatus) -> Result<i64>;
}
