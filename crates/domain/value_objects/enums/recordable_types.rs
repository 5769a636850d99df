use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Kind of entity a recording points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordableType {
    Channel,
    Episode,
    Series,
}

impl RecordableType {
    pub const ALL: [RecordableType; 3] = [
        RecordableType::Channel,
        RecordableType::Episode,
        RecordableType::Series,
    ];

    /// Episodes and series are on-demand content with no broadcast window.
    pub fn is_vod(&self) -> bool {
        matches!(self, RecordableType::Episode | RecordableType::Series)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordableType::Channel => "Channel",
            RecordableType::Episode => "Episode",
            RecordableType::Series => "Series",
        }
    }

    /// Option text used by the create form's record type select.
    pub fn option_label(&self) -> &'static str {
        match self {
            RecordableType::Channel => "Live Channel",
            RecordableType::Episode => "Series Episode",
            RecordableType::Series => "Entire Series",
        }
    }
}

impl Display for RecordableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let recordable_type = match self {
            RecordableType::Channel => "channel",
            RecordableType::Episode => "episode",
            RecordableType::Series => "series",
        };
        write!(f, "{}", recordable_type)
    }
}

impl FromStr for RecordableType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "channel" | "channels" => Ok(RecordableType::Channel),
            "episode" | "episodes" => Ok(RecordableType::Episode),
            "series" => Ok(RecordableType::Series),
            other => Err(format!("Unsupported recordable type: {}", other)),
        }
    }
}
