use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::recordings::RecordingEntity,
    value_objects::enums::{
        recordable_types::RecordableType, recording_statuses::RecordingStatus,
        sort_order::SortOrder,
    },
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordingSortField {
    #[default]
    ScheduledStart,
    ScheduledEnd,
    Title,
    CreatedAt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListRecordingsFilter {
    pub status: Option<RecordingStatus>,
    pub recordable_type: Option<RecordableType>,
    pub search: Option<String>,
    pub sort_by: RecordingSortField,
    pub sort_order: SortOrder,
    pub limit: Option<i64>,
}

/// Recording row with the eager-loaded stream profile name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingWithProfile {
    pub recording: RecordingEntity,
    pub stream_profile_name: Option<String>,
}
