use anyhow::anyhow;
use chrono::{DateTime, Utc};
use crates::domain::{
    entities::recordings::RecordingEntity,
    repositories::{
        recordable_targets::RecordableTargetRepository, recordings::RecordingRepository,
        stream_profiles::StreamProfileRepository,
    },
    value_objects::{
        display::{format_duration, format_file_size},
        enums::{
            recordable_types::RecordableType, recording_statuses::RecordingStatus,
            recurrence_types::RecurrenceType,
        },
        recording_requests::{
            RecordingRequest, RecordingRequestError, RecordingUpdateRequest,
            normalize_recording_update,
        },
        recordings::{ListRecordingsFilter, RecordingWithProfile},
    },
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::recording_request_resolver::{RecordingRequestResolver, ResolvedRecording};

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;
pub const MAX_BULK_DELETE: usize = 500;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error(transparent)]
    Request(#[from] RecordingRequestError),
    #[error("recording not found")]
    NotFound,
    #[error("recording cannot be edited while {0}")]
    NotEditable(RecordingStatus),
    #[error("recording cannot be deleted while {0}")]
    NotDeletable(RecordingStatus),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RecordingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            RecordingError::Request(RecordingRequestError::TargetNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            RecordingError::Request(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecordingError::NotFound => StatusCode::NOT_FOUND,
            RecordingError::NotEditable(_) | RecordingError::NotDeletable(_) => {
                StatusCode::CONFLICT
            }
            RecordingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, RecordingError>;

#[derive(Debug, Serialize)]
pub struct RecordingDto {
    pub id: i64,
    pub recordable_type: String,
    pub type_label: String,
    pub recordable_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub recurrence: String,
    pub stream_profile_id: i64,
    pub stream_profile_name: Option<String>,
    pub status: String,
    pub status_label: String,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub pre_padding_seconds: i32,
    pub post_padding_seconds: i32,
    pub max_retries: i32,
    pub retry_count: i32,
    pub duration_seconds: Option<i32>,
    pub duration: String,
    pub file_size_bytes: Option<i64>,
    pub file_size: String,
    pub can_edit: bool,
    pub can_delete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecordingWithProfile> for RecordingDto {
    fn from(value: RecordingWithProfile) -> Self {
        let RecordingWithProfile {
            recording,
            stream_profile_name,
        } = value;

        let type_label = recording
            .recordable_type
            .parse::<RecordableType>()
            .map(|recordable_type| recordable_type.label())
            .unwrap_or("Unknown")
            .to_string();
        let status = recording.status.parse::<RecordingStatus>().ok();

        Self {
            id: recording.id,
            type_label,
            recordable_id: recording.recordable_id,
            recurrence: recording.recurrence,
            stream_profile_id: recording.stream_profile_id,
            stream_profile_name,
            status_label: status
                .map(|status| status.label().to_string())
                .unwrap_or_else(|| recording.status.clone()),
            can_edit: status.is_some_and(|status| status.is_editable()),
            can_delete: status.is_some_and(|status| status.is_deletable()),
            status: recording.status,
            recordable_type: recording.recordable_type,
            title: recording.title,
            scheduled_start: recording.scheduled_start,
            scheduled_end: recording.scheduled_end,
            pre_padding_seconds: recording.pre_padding_seconds,
            post_padding_seconds: recording.post_padding_seconds,
            max_retries: recording.max_retries,
            retry_count: recording.retry_count,
            duration: format_duration(recording.duration_seconds),
            duration_seconds: recording.duration_seconds,
            file_size: format_file_size(recording.file_size_bytes),
            file_size_bytes: recording.file_size_bytes,
            created_at: recording.created_at,
            updated_at: recording.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedRecordingDto {
    #[serde(flatten)]
    pub recording: RecordingDto,
    pub target_label: String,
}

impl From<ResolvedRecording> for CreatedRecordingDto {
    fn from(value: ResolvedRecording) -> Self {
        Self {
            recording: RecordingDto::from(RecordingWithProfile {
                recording: value.recording,
                stream_profile_name: Some(value.stream_profile_name),
            }),
            target_label: value.target_label,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BulkDeleteDto {
    pub requested: usize,
    pub deleted: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SelectOptionDto<V> {
    pub value: V,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct FormOptionsDto {
    pub stream_profiles: Vec<SelectOptionDto<i64>>,
    pub recordable_types: Vec<SelectOptionDto<RecordableType>>,
    pub recurrences: Vec<SelectOptionDto<RecurrenceType>>,
    pub statuses: Vec<SelectOptionDto<RecordingStatus>>,
}

pub struct RecordingsUseCase<R, T, P>
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    recording_repo: Arc<R>,
    stream_profile_repo: Arc<P>,
    request_resolver: Arc<RecordingRequestResolver<R, T, P>>,
}

impl<R, T, P> RecordingsUseCase<R, T, P>
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    pub fn new(
        recording_repo: Arc<R>,
        stream_profile_repo: Arc<P>,
        request_resolver: Arc<RecordingRequestResolver<R, T, P>>,
    ) -> Self {
        Self {
            recording_repo,
            stream_profile_repo,
            request_resolver,
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: RecordingRequest,
    ) -> UseCaseResult<CreatedRecordingDto> {
        let resolved = self.request_resolver.resolve(user_id, request).await?;
        Ok(CreatedRecordingDto::from(resolved))
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        mut filter: ListRecordingsFilter,
    ) -> UseCaseResult<Vec<RecordingDto>> {
        filter.limit = Some(
            filter
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(1, MAX_LIST_LIMIT),
        );

        let recordings = self
            .recording_repo
            .list_owned(user_id, filter)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "recordings: failed to list recordings");
                RecordingError::Internal(err)
            })?;

        info!(%user_id, count = recordings.len(), "recordings: list loaded");
        Ok(recordings.into_iter().map(RecordingDto::from).collect())
    }

    pub async fn get(&self, user_id: Uuid, recording_id: i64) -> UseCaseResult<RecordingDto> {
        let recording = self.find_owned(user_id, recording_id).await?;
        Ok(RecordingDto::from(recording))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        recording_id: i64,
        update: RecordingUpdateRequest,
    ) -> UseCaseResult<RecordingDto> {
        let now = Utc::now();
        let current = self.find_owned(user_id, recording_id).await?;

        let status = stored_status(&current.recording)?;
        if !status.is_editable() {
            warn!(%user_id, recording_id, %status, "recordings: edit rejected for status");
            return Err(RecordingError::NotEditable(status));
        }

        let recordable_type = stored_recordable_type(&current.recording)?;
        let changeset =
            normalize_recording_update(recordable_type, &current.recording, update, now)?;

        let mut stream_profile_name = current.stream_profile_name;
        if let Some(profile_id) = changeset.stream_profile_id {
            let profile = self
                .stream_profile_repo
                .find_owned(user_id, profile_id)
                .await?
                .ok_or_else(|| {
                    RecordingRequestError::validation("stream_profile_id", "does not exist")
                })?;
            stream_profile_name = Some(profile.name);
        }

        let editable_statuses: Vec<RecordingStatus> = RecordingStatus::ALL
            .into_iter()
            .filter(RecordingStatus::is_editable)
            .collect();

        let updated = self
            .recording_repo
            .update_owned(user_id, recording_id, editable_statuses, changeset)
            .await
            .map_err(|err| {
                error!(%user_id, recording_id, db_error = ?err, "recordings: failed to update");
                RecordingError::Internal(err)
            })?;

        match updated {
            Some(recording) => {
                info!(%user_id, recording_id, "recordings: recording updated");
                Ok(RecordingDto::from(RecordingWithProfile {
                    recording,
                    stream_profile_name,
                }))
            }
            // Status moved between the read and the guarded write.
            None => {
                let latest = self.find_owned(user_id, recording_id).await?;
                Err(RecordingError::NotEditable(stored_status(&latest.recording)?))
            }
        }
    }

    pub async fn delete(&self, user_id: Uuid, recording_id: i64) -> UseCaseResult<()> {
        let current = self.find_owned(user_id, recording_id).await?;

        let status = stored_status(&current.recording)?;
        if !status.is_deletable() {
            warn!(%user_id, recording_id, %status, "recordings: delete rejected for status");
            return Err(RecordingError::NotDeletable(status));
        }

        let deleted = self
            .recording_repo
            .delete_owned(user_id, vec![recording_id], RecordingStatus::Recording)
            .await
            .map_err(|err| {
                error!(%user_id, recording_id, db_error = ?err, "recordings: failed to delete");
                RecordingError::Internal(err)
            })?;

        if deleted == 0 {
            return Err(RecordingError::NotDeletable(RecordingStatus::Recording));
        }

        info!(%user_id, recording_id, "recordings: recording deleted");
        Ok(())
    }

    /// Deletes every listed recording the caller owns, skipping any that are being recorded.
    pub async fn bulk_delete(
        &self,
        user_id: Uuid,
        recording_ids: Vec<i64>,
    ) -> UseCaseResult<BulkDeleteDto> {
        let mut recording_ids = recording_ids;
        recording_ids.sort_unstable();
        recording_ids.dedup();

        if recording_ids.is_empty() {
            return Err(RecordingRequestError::validation("ids", "is required").into());
        }
        if recording_ids.len() > MAX_BULK_DELETE {
            return Err(RecordingRequestError::validation(
                "ids",
                format!("must not contain more than {} items", MAX_BULK_DELETE),
            )
            .into());
        }

        let requested = recording_ids.len();
        let deleted = self
            .recording_repo
            .delete_owned(user_id, recording_ids, RecordingStatus::Recording)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "recordings: bulk delete failed");
                RecordingError::Internal(err)
            })?;

        info!(%user_id, requested, deleted, "recordings: bulk delete finished");
        Ok(BulkDeleteDto {
            requested,
            deleted,
            skipped: requested.saturating_sub(deleted),
        })
    }

    /// Count of recordings currently in progress for the navigation badge, hidden when zero.
    pub async fn navigation_badge(&self, user_id: Uuid) -> UseCaseResult<Option<i64>> {
        let in_progress = self
            .recording_repo
            .count_by_status(user_id, RecordingStatus::Recording)
            .await?;

        Ok((in_progress > 0).then_some(in_progress))
    }

    pub async fn form_options(&self, user_id: Uuid) -> UseCaseResult<FormOptionsDto> {
        let stream_profiles = self
            .stream_profile_repo
            .list_owned(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "recordings: failed to load stream profiles");
                RecordingError::Internal(err)
            })?;

        Ok(FormOptionsDto {
            stream_profiles: stream_profiles
                .into_iter()
                .map(|profile| SelectOptionDto {
                    value: profile.id,
                    label: profile.name,
                })
                .collect(),
            recordable_types: RecordableType::ALL
                .into_iter()
                .map(|value| SelectOptionDto {
                    value,
                    label: value.option_label().to_string(),
                })
                .collect(),
            recurrences: RecurrenceType::ALL
                .into_iter()
                .map(|value| SelectOptionDto {
                    value,
                    label: value.label().to_string(),
                })
                .collect(),
            statuses: RecordingStatus::ALL
                .into_iter()
                .map(|value| SelectOptionDto {
                    value,
                    label: value.label().to_string(),
                })
                .collect(),
        })
    }

    async fn find_owned(
        &self,
        user_id: Uuid,
        recording_id: i64,
    ) -> UseCaseResult<RecordingWithProfile> {
        self.recording_repo
            .find_owned(user_id, recording_id)
            .await
            .map_err(|err| {
                error!(%user_id, recording_id, db_error = ?err, "recordings: failed to load");
                RecordingError::Internal(err)
            })?
            .ok_or(RecordingError::NotFound)
    }
}

fn stored_status(recording: &RecordingEntity) -> UseCaseResult<RecordingStatus> {
    recording
        .status
        .parse::<RecordingStatus>()
        .map_err(|err| RecordingError::Internal(anyhow!("recording {}: {}", recording.id, err)))
}

fn stored_recordable_type(recording: &RecordingEntity) -> UseCaseResult<RecordableType> {
    recording
        .recordable_type
        .parse::<RecordableType>()
        .map_err(|err| RecordingError::Internal(anyhow!("recording {}: {}", recording.id, err)))
}
