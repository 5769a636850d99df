use anyhow::Result;
use crates::domain::{
    repositories::recordable_targets::RecordableTargetRepository,
    value_objects::{
        enums::recordable_types::RecordableType,
        recordable_targets::{
            ChannelPickerRow, EpisodePickerRow, ListTargetsFilter, SeriesPickerRow, TargetLabel,
        },
    },
};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const DEFAULT_PICKER_LIMIT: i64 = 50;
pub const MAX_PICKER_LIMIT: i64 = 200;
pub const MAX_LABEL_IDS: usize = 200;

#[derive(Debug, Error)]
pub enum RecordableTargetsError {
    #[error("at most {MAX_LABEL_IDS} ids can be looked up at once, got {0}")]
    TooManyIds(usize),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Picker rows for one recordable type, tagged so the form knows which columns to render.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "recordable_type", content = "items", rename_all = "snake_case")]
pub enum RecordableTargetList {
    Channel(Vec<ChannelPickerRow>),
    Episode(Vec<EpisodePickerRow>),
    Series(Vec<SeriesPickerRow>),
}

impl RecordableTargetList {
    pub fn len(&self) -> usize {
        match self {
            RecordableTargetList::Channel(rows) => rows.len(),
            RecordableTargetList::Episode(rows) => rows.len(),
            RecordableTargetList::Series(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct RecordableTargetsUseCase<T>
where
    T: RecordableTargetRepository + Send + Sync + 'static,
{
    target_repo: Arc<T>,
}

impl<T> RecordableTargetsUseCase<T>
where
    T: RecordableTargetRepository + Send + Sync + 'static,
{
    pub fn new(target_repo: Arc<T>) -> Self {
        Self { target_repo }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        recordable_type: RecordableType,
        mut filter: ListTargetsFilter,
    ) -> Result<RecordableTargetList> {
        filter.limit = Some(
            filter
                .limit
                .unwrap_or(DEFAULT_PICKER_LIMIT)
                .clamp(1, MAX_PICKER_LIMIT),
        );

        let rows = match recordable_type {
            RecordableType::Channel => self
                .target_repo
                .list_channels(user_id, filter)
                .await
                .map(RecordableTargetList::Channel),
            RecordableType::Episode => self
                .target_repo
                .list_episodes(user_id, filter)
                .await
                .map(RecordableTargetList::Episode),
            RecordableType::Series => self
                .target_repo
                .list_series(user_id, filter)
                .await
                .map(RecordableTargetList::Series),
        }
        .map_err(|err| {
            error!(%user_id, %recordable_type, db_error = ?err, "recordable_targets: list failed");
            err
        })?;

        info!(%user_id, %recordable_type, count = rows.len(), "recordable_targets: list loaded");
        Ok(rows)
    }

    /// Display labels for already selected ids. Ids the caller does not own are dropped.
    pub async fn labels(
        &self,
        user_id: Uuid,
        recordable_type: RecordableType,
        ids: Vec<i64>,
    ) -> std::result::Result<BTreeMap<i64, String>, RecordableTargetsError> {
        let mut ids = ids;
        ids.sort_unstable();
        ids.dedup();
        if ids.len() > MAX_LABEL_IDS {
            warn!(
                %user_id,
                %recordable_type,
                count = ids.len(),
                "recordable_targets: too many label ids"
            );
            return Err(RecordableTargetsError::TooManyIds(ids.len()));
        }

        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let labels = match recordable_type {
            RecordableType::Channel => self.target_repo.channel_labels(user_id, ids).await?,
            RecordableType::Episode => self.target_repo.episode_labels(user_id, ids).await?,
            RecordableType::Series => self.target_repo.series_labels(user_id, ids).await?,
        };

        Ok(labels
            .into_iter()
            .map(|TargetLabel { id, label }| (id, label))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        repositories::recordable_targets::MockRecordableTargetRepository,
        value_objects::enums::sort_order::SortOrder,
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn list_clamps_limit_and_tags_rows() {
        let user_id = Uuid::new_v4();
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_list_series()
            .withf(move |owner, filter| {
                *owner == user_id
                    && filter.limit == Some(MAX_PICKER_LIMIT)
                    && filter.sort_order == SortOrder::Asc
            })
            .returning(|_, _| {
                let rows = vec![SeriesPickerRow {
                    id: 42,
                    name: "Severance".to_string(),
                    playlist_name: "Main".to_string(),
                    category_name: None,
                    episodes_count: 19,
                }];
                Box::pin(async move { Ok(rows) })
            });

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let filter = ListTargetsFilter {
            limit: Some(10_000),
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let rows = usecase
            .list(user_id, RecordableType::Series, filter)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json["recordable_type"], "series");
        assert_eq!(json["items"][0]["episodes_count"], 19);
    }

    #[tokio::test]
    async fn list_defaults_limit_for_channels() {
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_list_channels()
            .withf(|_, filter| filter.limit == Some(DEFAULT_PICKER_LIMIT))
            .returning(|_, _| Box::pin(async { Ok(Vec::new()) }));

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let rows = usecase
            .list(
                Uuid::new_v4(),
                RecordableType::Channel,
                ListTargetsFilter::default(),
            )
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn labels_use_the_series_name_lookup() {
        let user_id = Uuid::new_v4();
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_series_labels()
            .with(eq(user_id), eq(vec![1, 2]))
            .returning(|_, _| {
                let labels = vec![TargetLabel {
                    id: 1,
                    label: "Severance".to_string(),
                }];
                Box::pin(async move { Ok(labels) })
            });
        target_repo.expect_channel_labels().never();

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let labels = usecase
            .labels(user_id, RecordableType::Series, vec![2, 1, 2])
            .await
            .unwrap();

        assert_eq!(labels.get(&1).map(String::as_str), Some("Severance"));
        assert!(!labels.contains_key(&2));
    }

    #[tokio::test]
    async fn labels_skip_lookup_without_ids() {
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo.expect_episode_labels().never();

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let labels = usecase
            .labels(Uuid::new_v4(), RecordableType::Episode, Vec::new())
            .await
            .unwrap();

        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn labels_reject_more_ids_than_the_lookup_limit() {
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo.expect_channel_labels().never();

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let ids = (1..=MAX_LABEL_IDS as i64 + 1).collect();
        let result = usecase
            .labels(Uuid::new_v4(), RecordableType::Channel, ids)
            .await;

        assert!(matches!(
            result,
            Err(RecordableTargetsError::TooManyIds(count)) if count == MAX_LABEL_IDS + 1
        ));
    }

    #[tokio::test]
    async fn labels_count_duplicates_once_against_the_limit() {
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_channel_labels()
            .withf(|_, ids| ids.len() == MAX_LABEL_IDS)
            .returning(|_, _| Box::pin(async { Ok(Vec::new()) }));

        let usecase = RecordableTargetsUseCase::new(Arc::new(target_repo));
        let mut ids: Vec<i64> = (1..=MAX_LABEL_IDS as i64).collect();
        ids.extend(1..=10);
        let labels = usecase
            .labels(Uuid::new_v4(), RecordableType::Channel, ids)
            .await
            .unwrap();

        assert!(labels.is_empty());
    }
}
