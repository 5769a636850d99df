use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::stream_profiles::StreamProfileEntity;

#[async_trait]
#[automock]
pub trait StreamProfileRepository {
    async fn find_owned(&self, user_id: Uuid, profile_id: i64)
    -> Result<Option<StreamProfileEntity>>;

    async fn list_owned(&self, user_id: Uuid) -> Result<Vec<StreamProfileEntity>>;
}
