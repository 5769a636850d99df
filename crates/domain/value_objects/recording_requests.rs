use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::recordings::{InsertRecordingEntity, RecordingEntity, UpdateRecordingEntity},
    value_objects::{
        enums::{
            recordable_types::RecordableType, recording_statuses::RecordingStatus,
            recurrence_types::RecurrenceType,
        },
        recordable_targets::RecordableTarget,
    },
};

pub const MAX_TITLE_LEN: usize = 255;
pub const DEFAULT_PRE_PADDING_SECONDS: i32 = 60;
pub const DEFAULT_POST_PADDING_SECONDS: i32 = 120;
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Completion deadline handed to the executor for episode and series recordings.
/// This is a policy bound, it is not derived from the content's runtime.
pub const VOD_COMPLETION_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingRequestError {
    #[error("{0} is required for live channel recordings")]
    MissingSchedule(&'static str),
    #[error("scheduled_end must be after scheduled_start")]
    InvalidWindow,
    #[error("{0} not found")]
    TargetNotFound(RecordableTarget),
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl RecordingRequestError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        RecordingRequestError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Form field the error should be reported against.
    pub fn field(&self) -> &'static str {
        match self {
            RecordingRequestError::MissingSchedule(field) => field,
            RecordingRequestError::InvalidWindow => "scheduled_end",
            RecordingRequestError::TargetNotFound(_) => "recordable_id",
            RecordingRequestError::Validation { field, .. } => field,
        }
    }
}

/// Create payload as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordingRequest {
    pub recordable_type: RecordableType,
    pub recordable_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "type")]
    pub recurrence: RecurrenceType,
    pub stream_profile_id: Option<i64>,
    #[serde(default)]
    pub start_now: bool,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub pre_padding_seconds: Option<i32>,
    pub post_padding_seconds: Option<i32>,
    pub max_retries: Option<i32>,
    /// Never trusted, ownership comes from the authenticated caller. Any JSON shape is accepted.
    pub user_id: Option<serde_json::Value>,
    /// Never trusted, new recordings always start out scheduled. Any JSON shape is accepted.
    pub status: Option<serde_json::Value>,
}

/// A request that passed every check that does not need the datastore.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledRecording {
    pub user_id: Uuid,
    pub target: RecordableTarget,
    pub title: String,
    pub recurrence: RecurrenceType,
    pub stream_profile_id: i64,
    pub status: RecordingStatus,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub pre_padding_seconds: i32,
    pub post_padding_seconds: i32,
    pub max_retries: i32,
}

impl ScheduledRecording {
    pub fn to_entity(&self, now: DateTime<Utc>) -> InsertRecordingEntity {
        InsertRecordingEntity {
            user_id: self.user_id,
            recordable_type: self.target.recordable_type().to_string(),
            recordable_id: self.target.id(),
            title: self.title.clone(),
            recurrence: self.recurrence.to_string(),
            stream_profile_id: self.stream_profile_id,
            status: self.status.to_string(),
            scheduled_start: self.scheduled_start,
            scheduled_end: self.scheduled_end,
            pre_padding_seconds: self.pre_padding_seconds,
            post_padding_seconds: self.post_padding_seconds,
            max_retries: self.max_retries,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduleWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    pre_padding_seconds: i32,
    post_padding_seconds: i32,
}

impl ScheduleWindow {
    fn vod(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            end: now + Duration::hours(VOD_COMPLETION_WINDOW_HOURS),
            pre_padding_seconds: 0,
            post_padding_seconds: 0,
        }
    }
}

/// Applies the create rules that do not need the datastore: owner and status stamping,
/// immediate start, VOD window normalization and live window validation.
pub fn normalize_recording_request(
    request: RecordingRequest,
    caller_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ScheduledRecording, RecordingRequestError> {
    let title = validate_title(&request.title)?;
    let stream_profile_id = request
        .stream_profile_id
        .ok_or_else(|| RecordingRequestError::validation("stream_profile_id", "is required"))?;
    let max_retries = non_negative(
        "max_retries",
        request.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
    )?;

    let window = if request.recordable_type.is_vod() {
        ScheduleWindow::vod(now)
    } else {
        live_window(&request, now)?
    };

    Ok(ScheduledRecording {
        user_id: caller_id,
        target: RecordableTarget::new(request.recordable_type, request.recordable_id),
        title,
        recurrence: request.recurrence,
        stream_profile_id,
        status: RecordingStatus::Scheduled,
        scheduled_start: window.start,
        scheduled_end: window.end,
        pre_padding_seconds: window.pre_padding_seconds,
        post_padding_seconds: window.post_padding_seconds,
        max_retries,
    })
}

fn live_window(
    request: &RecordingRequest,
    now: DateTime<Utc>,
) -> Result<ScheduleWindow, RecordingRequestError> {
    let post_padding_seconds = non_negative(
        "post_padding_seconds",
        request
            .post_padding_seconds
            .unwrap_or(DEFAULT_POST_PADDING_SECONDS),
    )?;

    // Nothing can be recorded before "now", so pre-padding is dropped with start_now.
    let (start, pre_padding_seconds) = if request.start_now {
        (now, 0)
    } else {
        let start = request
            .scheduled_start
            .ok_or(RecordingRequestError::MissingSchedule("scheduled_start"))?;
        let pre_padding_seconds = non_negative(
            "pre_padding_seconds",
            request
                .pre_padding_seconds
                .unwrap_or(DEFAULT_PRE_PADDING_SECONDS),
        )?;
        (start, pre_padding_seconds)
    };

    let end = request
        .scheduled_end
        .ok_or(RecordingRequestError::MissingSchedule("scheduled_end"))?;
    validate_window(start, end)?;

    Ok(ScheduleWindow {
        start,
        end,
        pre_padding_seconds,
        post_padding_seconds,
    })
}

pub fn validate_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), RecordingRequestError> {
    if end <= start {
        return Err(RecordingRequestError::InvalidWindow);
    }
    Ok(())
}

fn validate_title(raw: &str) -> Result<String, RecordingRequestError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(RecordingRequestError::validation("title", "is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(RecordingRequestError::validation(
            "title",
            format!("must not be greater than {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(title.to_string())
}

fn non_negative(field: &'static str, value: i32) -> Result<i32, RecordingRequestError> {
    if value < 0 {
        return Err(RecordingRequestError::validation(
            field,
            "must be zero or greater",
        ));
    }
    Ok(value)
}

/// Edit payload. The target is fixed once a recording exists.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RecordingUpdateRequest {
    pub title: Option<String>,
    #[serde(alias = "type")]
    pub recurrence: Option<RecurrenceType>,
    pub stream_profile_id: Option<i64>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub pre_padding_seconds: Option<i32>,
    pub post_padding_seconds: Option<i32>,
    pub max_retries: Option<i32>,
}

/// Builds the changeset for an edit. Schedule and padding fields are only honoured for
/// live channel recordings; VOD windows stay resolver-assigned.
pub fn normalize_recording_update(
    recordable_type: RecordableType,
    current: &RecordingEntity,
    update: RecordingUpdateRequest,
    now: DateTime<Utc>,
) -> Result<UpdateRecordingEntity, RecordingRequestError> {
    let title = update.title.as_deref().map(validate_title).transpose()?;
    let max_retries = update
        .max_retries
        .map(|value| non_negative("max_retries", value))
        .transpose()?;

    let mut changeset = UpdateRecordingEntity {
        title,
        recurrence: update.recurrence.map(|recurrence| recurrence.to_string()),
        stream_profile_id: update.stream_profile_id,
        max_retries,
        updated_at: Some(now),
        ..Default::default()
    };

    if recordable_type.is_vod() {
        return Ok(changeset);
    }

    if update.scheduled_start.is_some() || update.scheduled_end.is_some() {
        let start = update.scheduled_start.unwrap_or(current.scheduled_start);
        let end = update.scheduled_end.unwrap_or(current.scheduled_end);
        validate_window(start, end)?;
        changeset.scheduled_start = update.scheduled_start;
        changeset.scheduled_end = update.scheduled_end;
    }

    changeset.pre_padding_seconds = update
        .pre_padding_seconds
        .map(|value| non_negative("pre_padding_seconds", value))
        .transpose()?;
    changeset.post_padding_seconds = update
        .post_padding_seconds
        .map(|value| non_negative("post_padding_seconds", value))
        .transpose()?;

    Ok(changeset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::recordable_targets::{ChannelId, SeriesId};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap()
    }

    fn channel_request() -> RecordingRequest {
        RecordingRequest {
            recordable_type: RecordableType::Channel,
            recordable_id: 7,
            title: "Evening News".to_string(),
            recurrence: RecurrenceType::Once,
            stream_profile_id: Some(1),
            start_now: false,
            scheduled_start: Some(now() + Duration::hours(1)),
            scheduled_end: Some(now() + Duration::hours(2)),
            pre_padding_seconds: None,
            post_padding_seconds: None,
            max_retries: None,
            user_id: None,
            status: None,
        }
    }

    fn vod_request(recordable_type: RecordableType) -> RecordingRequest {
        RecordingRequest {
            recordable_type,
            recordable_id: 42,
            scheduled_start: None,
            scheduled_end: None,
            ..channel_request()
        }
    }

    #[test]
    fn caller_and_status_override_payload() {
        let caller = Uuid::new_v4();
        let mut request = channel_request();
        request.user_id = Some(serde_json::json!(Uuid::new_v4()));
        request.status = Some(serde_json::json!("completed"));

        let scheduled = normalize_recording_request(request, caller, now()).unwrap();

        assert_eq!(scheduled.user_id, caller);
        assert_eq!(scheduled.status, RecordingStatus::Scheduled);
    }

    #[test]
    fn foreign_shaped_owner_and_status_are_discarded() {
        let caller = Uuid::new_v4();
        let request: RecordingRequest = serde_json::from_value(serde_json::json!({
            "recordable_type": "series",
            "recordable_id": 42,
            "title": "Test",
            "stream_profile_id": 1,
            "user_id": 5,
            "status": { "x": 1 }
        }))
        .unwrap();

        let scheduled = normalize_recording_request(request, caller, now()).unwrap();

        assert_eq!(scheduled.user_id, caller);
        assert_eq!(scheduled.status, RecordingStatus::Scheduled);
    }

    #[test]
    fn live_channel_keeps_its_window_and_default_padding() {
        let scheduled =
            normalize_recording_request(channel_request(), Uuid::new_v4(), now()).unwrap();

        assert_eq!(scheduled.target, RecordableTarget::Channel(ChannelId(7)));
        assert_eq!(scheduled.scheduled_start, now() + Duration::hours(1));
        assert_eq!(scheduled.scheduled_end, now() + Duration::hours(2));
        assert_eq!(scheduled.pre_padding_seconds, DEFAULT_PRE_PADDING_SECONDS);
        assert_eq!(scheduled.post_padding_seconds, DEFAULT_POST_PADDING_SECONDS);
        assert_eq!(scheduled.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn start_now_uses_resolution_time() {
        let mut request = channel_request();
        request.start_now = true;
        request.scheduled_start = Some(now() - Duration::days(3));
        request.pre_padding_seconds = Some(300);

        let scheduled = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap();

        assert_eq!(scheduled.scheduled_start, now());
        assert_eq!(scheduled.pre_padding_seconds, 0);
    }

    #[test]
    fn start_now_still_requires_an_end_after_now() {
        let mut request = channel_request();
        request.start_now = true;
        request.scheduled_end = None;
        assert_eq!(
            normalize_recording_request(request.clone(), Uuid::new_v4(), now()),
            Err(RecordingRequestError::MissingSchedule("scheduled_end"))
        );

        request.scheduled_end = Some(now() - Duration::minutes(1));
        assert_eq!(
            normalize_recording_request(request, Uuid::new_v4(), now()),
            Err(RecordingRequestError::InvalidWindow)
        );
    }

    #[test]
    fn vod_targets_get_a_fixed_day_long_window_without_padding() {
        for recordable_type in [RecordableType::Episode, RecordableType::Series] {
            let mut request = vod_request(recordable_type);
            request.pre_padding_seconds = Some(999);
            request.post_padding_seconds = Some(999);
            request.scheduled_start = Some(now() + Duration::days(10));
            request.scheduled_end = Some(now() + Duration::days(11));

            let scheduled = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap();

            assert_eq!(scheduled.scheduled_start, now());
            assert_eq!(
                scheduled.scheduled_end - scheduled.scheduled_start,
                Duration::hours(24)
            );
            assert_eq!(scheduled.pre_padding_seconds, 0);
            assert_eq!(scheduled.post_padding_seconds, 0);
        }
    }

    #[test]
    fn series_request_from_form_json_is_normalized() {
        let request: RecordingRequest = serde_json::from_value(serde_json::json!({
            "recordable_type": "series",
            "recordable_id": 42,
            "title": "Test",
            "stream_profile_id": 1,
            "pre_padding_seconds": 999,
        }))
        .unwrap();

        let scheduled = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap();

        assert_eq!(scheduled.target, RecordableTarget::Series(SeriesId(42)));
        assert_eq!(scheduled.scheduled_start, now());
        assert_eq!(scheduled.scheduled_end, now() + Duration::hours(24));
        assert_eq!(scheduled.pre_padding_seconds, 0);
        assert_eq!(scheduled.recurrence, RecurrenceType::Once);
    }

    #[test]
    fn missing_live_schedule_is_rejected() {
        let mut request = channel_request();
        request.scheduled_start = None;
        assert_eq!(
            normalize_recording_request(request, Uuid::new_v4(), now()),
            Err(RecordingRequestError::MissingSchedule("scheduled_start"))
        );

        let mut request = channel_request();
        request.scheduled_end = None;
        assert_eq!(
            normalize_recording_request(request, Uuid::new_v4(), now()),
            Err(RecordingRequestError::MissingSchedule("scheduled_end"))
        );
    }

    #[test]
    fn end_not_after_start_is_rejected() {
        for end_offset in [Duration::zero(), Duration::minutes(-30)] {
            let mut request = channel_request();
            request.scheduled_end = request.scheduled_start.map(|start| start + end_offset);
            assert_eq!(
                normalize_recording_request(request, Uuid::new_v4(), now()),
                Err(RecordingRequestError::InvalidWindow)
            );
        }
    }

    #[test]
    fn field_level_validation_errors_name_their_field() {
        let mut request = channel_request();
        request.title = "   ".to_string();
        let err = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap_err();
        assert_eq!(err.field(), "title");

        let mut request = channel_request();
        request.title = "x".repeat(MAX_TITLE_LEN + 1);
        let err = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap_err();
        assert_eq!(err.field(), "title");

        let mut request = channel_request();
        request.stream_profile_id = None;
        let err = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap_err();
        assert_eq!(err.field(), "stream_profile_id");

        let mut request = channel_request();
        request.post_padding_seconds = Some(-1);
        let err = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap_err();
        assert_eq!(err.field(), "post_padding_seconds");

        let mut request = vod_request(RecordableType::Episode);
        request.max_retries = Some(-2);
        let err = normalize_recording_request(request, Uuid::new_v4(), now()).unwrap_err();
        assert_eq!(err.field(), "max_retries");
    }

    #[test]
    fn legacy_type_key_maps_to_recurrence() {
        let request: RecordingRequest = serde_json::from_value(serde_json::json!({
            "recordable_type": "channel",
            "recordable_id": 1,
            "title": "Match",
            "type": "weekly",
            "stream_profile_id": 2,
            "start_now": true,
            "scheduled_end": "2026-03-14T22:00:00Z",
        }))
        .unwrap();
        assert_eq!(request.recurrence, RecurrenceType::Weekly);
        assert!(request.start_now);
    }

    fn stored(recordable_type: RecordableType) -> RecordingEntity {
        RecordingEntity {
            id: 1,
            user_id: Uuid::new_v4(),
            recordable_type: recordable_type.to_string(),
            recordable_id: 7,
            title: "Evening News".to_string(),
            recurrence: RecurrenceType::Once.to_string(),
            stream_profile_id: 1,
            status: RecordingStatus::Scheduled.to_string(),
            scheduled_start: now() + Duration::hours(1),
            scheduled_end: now() + Duration::hours(2),
            pre_padding_seconds: 60,
            post_padding_seconds: 120,
            max_retries: 3,
            retry_count: 0,
            duration_seconds: None,
            file_size_bytes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn update_checks_the_merged_live_window() {
        let current = stored(RecordableType::Channel);
        let update = RecordingUpdateRequest {
            scheduled_end: Some(now() + Duration::minutes(30)),
            ..Default::default()
        };
        assert_eq!(
            normalize_recording_update(RecordableType::Channel, &current, update, now()),
            Err(RecordingRequestError::InvalidWindow)
        );

        let update = RecordingUpdateRequest {
            scheduled_end: Some(now() + Duration::hours(3)),
            post_padding_seconds: Some(30),
            ..Default::default()
        };
        let changeset =
            normalize_recording_update(RecordableType::Channel, &current, update, now()).unwrap();
        assert_eq!(changeset.scheduled_end, Some(now() + Duration::hours(3)));
        assert_eq!(changeset.scheduled_start, None);
        assert_eq!(changeset.post_padding_seconds, Some(30));
    }

    #[test]
    fn update_ignores_schedule_fields_for_vod() {
        let current = stored(RecordableType::Series);
        let update = RecordingUpdateRequest {
            title: Some("Renamed".to_string()),
            scheduled_end: Some(now() - Duration::days(1)),
            pre_padding_seconds: Some(500),
            ..Default::default()
        };

        let changeset =
            normalize_recording_update(RecordableType::Series, &current, update, now()).unwrap();

        assert_eq!(changeset.title.as_deref(), Some("Renamed"));
        assert_eq!(changeset.scheduled_end, None);
        assert_eq!(changeset.pre_padding_seconds, None);
        assert_eq!(changeset.updated_at, Some(now()));
    }
}
