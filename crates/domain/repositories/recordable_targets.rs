use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::{channels::ChannelEntity, episodes::EpisodeEntity, series::SeriesEntity},
    value_objects::recordable_targets::{
        ChannelId, ChannelPickerRow, EpisodeId, EpisodePickerRow, ListTargetsFilter, SeriesId,
        SeriesPickerRow, TargetLabel,
    },
};

/// Lookups over the entities a recording can point at, always scoped to one owner.
#[async_trait]
#[automock]
pub trait RecordableTargetRepository {
    /// Enabled channel owned by `user_id`.
    async fn find_channel(&self, user_id: Uuid, channel_id: ChannelId)
    -> Result<Option<ChannelEntity>>;

    async fn find_episode(&self, user_id: Uuid, episode_id: EpisodeId)
    -> Result<Option<EpisodeEntity>>;

    /// Enabled series owned by `user_id`.
    async fn find_series(&self, user_id: Uuid, series_id: SeriesId)
    -> Result<Option<SeriesEntity>>;

    async fn list_channels(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<ChannelPickerRow>>;

    async fn list_episodes(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<EpisodePickerRow>>;

    async fn list_series(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<SeriesPickerRow>>;

    async fn channel_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>>;

    async fn episode_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>>;

    async fn series_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>>;
}
