use anyhow::Result;
use chrono::Utc;
use crates::domain::{
    entities::recordings::RecordingEntity,
    repositories::{
        recordable_targets::RecordableTargetRepository, recordings::RecordingRepository,
        stream_profiles::StreamProfileRepository,
    },
    value_objects::{
        recordable_targets::{RecordableTarget, ResolvedTarget},
        recording_requests::{RecordingRequest, RecordingRequestError, normalize_recording_request},
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::recordings::{RecordingError, UseCaseResult};

/// A freshly persisted recording together with the display names resolved on the way.
#[derive(Debug, Clone)]
pub struct ResolvedRecording {
    pub recording: RecordingEntity,
    pub target_label: String,
    pub stream_profile_name: String,
}

/// Turns a submitted create form into a persisted, scheduled recording.
pub struct RecordingRequestResolver<R, T, P>
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    recording_repo: Arc<R>,
    target_repo: Arc<T>,
    stream_profile_repo: Arc<P>,
}

impl<R, T, P> RecordingRequestResolver<R, T, P>
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    pub fn new(recording_repo: Arc<R>, target_repo: Arc<T>, stream_profile_repo: Arc<P>) -> Self {
        Self {
            recording_repo,
            target_repo,
            stream_profile_repo,
        }
    }

    pub async fn resolve(
        &self,
        caller_id: Uuid,
        request: RecordingRequest,
    ) -> UseCaseResult<ResolvedRecording> {
        let now = Utc::now();
        info!(
            %caller_id,
            recordable_type = %request.recordable_type,
            recordable_id = request.recordable_id,
            start_now = request.start_now,
            "recording_resolver: create requested"
        );

        if request.user_id.is_some() {
            warn!(%caller_id, "recording_resolver: ignoring client supplied user_id");
        }

        let scheduled = normalize_recording_request(request, caller_id, now).map_err(|err| {
            warn!(
                %caller_id,
                field = err.field(),
                error = %err,
                "recording_resolver: request rejected"
            );
            err
        })?;

        let target = self
            .find_target(caller_id, scheduled.target)
            .await?
            .ok_or_else(|| {
                warn!(
                    %caller_id,
                    target = %scheduled.target,
                    "recording_resolver: target not found for caller"
                );
                RecordingRequestError::TargetNotFound(scheduled.target)
            })?;

        let stream_profile = self
            .stream_profile_repo
            .find_owned(caller_id, scheduled.stream_profile_id)
            .await
            .map_err(|err| {
                error!(
                    %caller_id,
                    db_error = ?err,
                    "recording_resolver: failed to load stream profile"
                );
                err
            })?
            .ok_or_else(|| {
                warn!(
                    %caller_id,
                    stream_profile_id = scheduled.stream_profile_id,
                    "recording_resolver: stream profile not found for caller"
                );
                RecordingRequestError::validation("stream_profile_id", "does not exist")
            })?;

        let recording = self
            .recording_repo
            .insert(scheduled.to_entity(now))
            .await
            .map_err(|err| {
                error!(
                    %caller_id,
                    target = %scheduled.target,
                    db_error = ?err,
                    "recording_resolver: failed to persist recording"
                );
                RecordingError::Internal(err)
            })?;

        info!(
            %caller_id,
            recording_id = recording.id,
            target = %scheduled.target,
            scheduled_start = %recording.scheduled_start,
            scheduled_end = %recording.scheduled_end,
            "recording_resolver: recording scheduled"
        );

        Ok(ResolvedRecording {
            recording,
            target_label: target.label().to_string(),
            stream_profile_name: stream_profile.name,
        })
    }

    async fn find_target(
        &self,
        caller_id: Uuid,
        target: RecordableTarget,
    ) -> Result<Option<ResolvedTarget>> {
        let resolved = match target {
            RecordableTarget::Channel(channel_id) => self
                .target_repo
                .find_channel(caller_id, channel_id)
                .await?
                .map(ResolvedTarget::Channel),
            RecordableTarget::Episode(episode_id) => self
                .target_repo
                .find_episode(caller_id, episode_id)
                .await?
                .map(ResolvedTarget::Episode),
            RecordableTarget::Series(series_id) => self
                .target_repo
                .find_series(caller_id, series_id)
                .await?
                .map(ResolvedTarget::Series),
        };
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use crates::domain::{
        entities::{
            channels::ChannelEntity, recordings::InsertRecordingEntity, series::SeriesEntity,
            stream_profiles::StreamProfileEntity,
        },
        repositories::{
            recordable_targets::MockRecordableTargetRepository,
            recordings::MockRecordingRepository,
            stream_profiles::MockStreamProfileRepository,
        },
        value_objects::{
            enums::{
                recordable_types::RecordableType, recording_statuses::RecordingStatus,
                recurrence_types::RecurrenceType,
            },
            recordable_targets::{ChannelId, SeriesId},
        },
    };
    use mockall::predicate::eq;

    fn sample_channel(user_id: Uuid, id: i64) -> ChannelEntity {
        let now = Utc::now();
        ChannelEntity {
            id,
            user_id,
            playlist_id: 1,
            group_id: Some(2),
            title: "Sky Sports".to_string(),
            stream_icon: None,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_series(user_id: Uuid, id: i64) -> SeriesEntity {
        let now = Utc::now();
        SeriesEntity {
            id,
            user_id,
            playlist_id: 1,
            category_id: None,
            name: "Severance".to_string(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_profile(user_id: Uuid, id: i64) -> StreamProfileEntity {
        let now = Utc::now();
        StreamProfileEntity {
            id,
            user_id,
            name: "1080p MKV".to_string(),
            format: "mkv".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn persisted(entity: InsertRecordingEntity) -> RecordingEntity {
        RecordingEntity {
            id: 100,
            user_id: entity.user_id,
            recordable_type: entity.recordable_type,
            recordable_id: entity.recordable_id,
            title: entity.title,
            recurrence: entity.recurrence,
            stream_profile_id: entity.stream_profile_id,
            status: entity.status,
            scheduled_start: entity.scheduled_start,
            scheduled_end: entity.scheduled_end,
            pre_padding_seconds: entity.pre_padding_seconds,
            post_padding_seconds: entity.post_padding_seconds,
            max_retries: entity.max_retries,
            retry_count: 0,
            duration_seconds: None,
            file_size_bytes: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    fn request(recordable_type: RecordableType, recordable_id: i64) -> RecordingRequest {
        RecordingRequest {
            recordable_type,
            recordable_id,
            title: "Test".to_string(),
            recurrence: RecurrenceType::Once,
            stream_profile_id: Some(1),
            start_now: false,
            scheduled_start: None,
            scheduled_end: None,
            pre_padding_seconds: None,
            post_padding_seconds: None,
            max_retries: None,
            user_id: None,
            status: None,
        }
    }

    fn close_to(actual: DateTime<Utc>, expected: DateTime<Utc>) -> bool {
        (actual - expected).num_seconds().abs() <= 5
    }

    fn profile_repo_for(caller: Uuid) -> MockStreamProfileRepository {
        let mut stream_profile_repo = MockStreamProfileRepository::new();
        stream_profile_repo
            .expect_find_owned()
            .with(eq(caller), eq(1))
            .returning(move |user_id, id| {
                let profile = sample_profile(user_id, id);
                Box::pin(async move { Ok(Some(profile)) })
            });
        stream_profile_repo
    }

    #[tokio::test]
    async fn series_request_gets_vod_window_and_caller_ownership() {
        let caller = Uuid::new_v4();

        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_find_series()
            .with(eq(caller), eq(SeriesId(42)))
            .returning(move |user_id, SeriesId(id)| {
                let series = sample_series(user_id, id);
                Box::pin(async move { Ok(Some(series)) })
            });

        let mut recording_repo = MockRecordingRepository::new();
        recording_repo
            .expect_insert()
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(persisted(entity)) }));

        let resolver = RecordingRequestResolver::new(
            Arc::new(recording_repo),
            Arc::new(target_repo),
            Arc::new(profile_repo_for(caller)),
        );

        let mut input = request(RecordableType::Series, 42);
        input.pre_padding_seconds = Some(999);
        input.user_id = Some(serde_json::json!(5));
        input.status = Some(serde_json::json!("recording"));

        let resolved = resolver.resolve(caller, input).await.unwrap();
        let recording = resolved.recording;

        assert_eq!(recording.user_id, caller);
        assert_eq!(recording.status, RecordingStatus::Scheduled.to_string());
        assert_eq!(recording.recordable_type, "series");
        assert!(close_to(recording.scheduled_start, Utc::now()));
        assert_eq!(
            recording.scheduled_end - recording.scheduled_start,
            Duration::hours(24)
        );
        assert_eq!(recording.pre_padding_seconds, 0);
        assert_eq!(recording.post_padding_seconds, 0);
        assert_eq!(resolved.target_label, "Severance");
        assert_eq!(resolved.stream_profile_name, "1080p MKV");
    }

    #[tokio::test]
    async fn start_now_channel_request_starts_immediately() {
        let caller = Uuid::new_v4();

        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_find_channel()
            .with(eq(caller), eq(ChannelId(7)))
            .returning(move |user_id, ChannelId(id)| {
                let channel = sample_channel(user_id, id);
                Box::pin(async move { Ok(Some(channel)) })
            });

        let mut recording_repo = MockRecordingRepository::new();
        recording_repo
            .expect_insert()
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(persisted(entity)) }));

        let resolver = RecordingRequestResolver::new(
            Arc::new(recording_repo),
            Arc::new(target_repo),
            Arc::new(profile_repo_for(caller)),
        );

        let mut input = request(RecordableType::Channel, 7);
        input.start_now = true;
        input.scheduled_end = Some(Utc::now() + Duration::hours(2));

        let resolved = resolver.resolve(caller, input).await.unwrap();

        assert!(close_to(resolved.recording.scheduled_start, Utc::now()));
        assert_eq!(resolved.target_label, "Sky Sports");
    }

    #[tokio::test]
    async fn unknown_disabled_or_foreign_target_is_rejected_without_writing() {
        let caller = Uuid::new_v4();

        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_find_channel()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let mut recording_repo = MockRecordingRepository::new();
        recording_repo.expect_insert().never();

        let mut stream_profile_repo = MockStreamProfileRepository::new();
        stream_profile_repo.expect_find_owned().never();

        let resolver = RecordingRequestResolver::new(
            Arc::new(recording_repo),
            Arc::new(target_repo),
            Arc::new(stream_profile_repo),
        );

        let mut input = request(RecordableType::Channel, 9);
        input.scheduled_start = Some(Utc::now() + Duration::hours(1));
        input.scheduled_end = Some(Utc::now() + Duration::hours(2));

        let err = resolver.resolve(caller, input).await.unwrap_err();

        assert!(matches!(
            err,
            RecordingError::Request(RecordingRequestError::TargetNotFound(
                RecordableTarget::Channel(ChannelId(9))
            ))
        ));
    }

    #[tokio::test]
    async fn invalid_window_is_rejected_before_any_lookup() {
        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo.expect_find_channel().never();
        let mut recording_repo = MockRecordingRepository::new();
        recording_repo.expect_insert().never();

        let resolver = RecordingRequestResolver::new(
            Arc::new(recording_repo),
            Arc::new(target_repo),
            Arc::new(MockStreamProfileRepository::new()),
        );

        let start = Utc::now() + Duration::hours(3);
        let mut input = request(RecordableType::Channel, 7);
        input.scheduled_start = Some(start);
        input.scheduled_end = Some(start);

        let err = resolver.resolve(Uuid::new_v4(), input).await.unwrap_err();

        assert!(matches!(
            err,
            RecordingError::Request(RecordingRequestError::InvalidWindow)
        ));
    }

    #[tokio::test]
    async fn foreign_stream_profile_is_a_field_error() {
        let caller = Uuid::new_v4();

        let mut target_repo = MockRecordableTargetRepository::new();
        target_repo
            .expect_find_series()
            .returning(move |user_id, SeriesId(id)| {
                let series = sample_series(user_id, id);
                Box::pin(async move { Ok(Some(series)) })
            });

        let mut stream_profile_repo = MockStreamProfileRepository::new();
        stream_profile_repo
            .expect_find_owned()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let mut recording_repo = MockRecordingRepository::new();
        recording_repo.expect_insert().never();

        let resolver = RecordingRequestResolver::new(
            Arc::new(recording_repo),
            Arc::new(target_repo),
            Arc::new(stream_profile_repo),
        );

        let err = resolver
            .resolve(caller, request(RecordableType::Series, 42))
            .await
            .unwrap_err();

        match err {
            RecordingError::Request(err) => assert_eq!(err.field(), "stream_profile_id"),
            other => panic!("expected field error, got {other:?}"),
        }
    }
}
