use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordingStatus {
    #[default]
    Scheduled,
    Recording,
    Completed,
    Failed,
    Cancelled,
}

impl RecordingStatus {
    pub const ALL: [RecordingStatus; 5] = [
        RecordingStatus::Scheduled,
        RecordingStatus::Recording,
        RecordingStatus::Completed,
        RecordingStatus::Failed,
        RecordingStatus::Cancelled,
    ];

    /// A recording in progress or already finished can no longer be reconfigured.
    pub fn is_editable(&self) -> bool {
        !matches!(self, RecordingStatus::Recording | RecordingStatus::Completed)
    }

    pub fn is_deletable(&self) -> bool {
        !matches!(self, RecordingStatus::Recording)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordingStatus::Scheduled => "Scheduled",
            RecordingStatus::Recording => "Recording",
            RecordingStatus::Completed => "Completed",
            RecordingStatus::Failed => "Failed",
            RecordingStatus::Cancelled => "Cancelled",
        }
    }
}

impl Display for RecordingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let recording_status = match self {
            RecordingStatus::Scheduled => "scheduled",
            RecordingStatus::Recording => "recording",
            RecordingStatus::Completed => "completed",
            RecordingStatus::Failed => "failed",
            RecordingStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", recording_status)
    }
}

impl FromStr for RecordingStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "scheduled" => Ok(RecordingStatus::Scheduled),
            "recording" => Ok(RecordingStatus::Recording),
            "completed" => Ok(RecordingStatus::Completed),
            "failed" => Ok(RecordingStatus::Failed),
            "cancelled" => Ok(RecordingStatus::Cancelled),
            other => Err(format!("Unknown recording status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for status in RecordingStatus::ALL {
            assert_eq!(status.to_string().parse::<RecordingStatus>(), Ok(status));
        }
    }

    #[test]
    fn only_in_progress_recordings_block_delete() {
        for status in RecordingStatus::ALL {
            assert_eq!(status.is_deletable(), status != RecordingStatus::Recording);
        }
    }

    #[test]
    fn in_progress_and_completed_recordings_block_edit() {
        assert!(RecordingStatus::Scheduled.is_editable());
        assert!(RecordingStatus::Failed.is_editable());
        assert!(RecordingStatus::Cancelled.is_editable());
        assert!(!RecordingStatus::Recording.is_editable());
        assert!(!RecordingStatus::Completed.is_editable());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("canceled".parse::<RecordingStatus>().is_err());
    }
}
