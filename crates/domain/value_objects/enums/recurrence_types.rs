use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    #[default]
    Once,
    Series,
    Daily,
    Weekly,
}

impl RecurrenceType {
    pub const ALL: [RecurrenceType; 4] = [
        RecurrenceType::Once,
        RecurrenceType::Series,
        RecurrenceType::Daily,
        RecurrenceType::Weekly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceType::Once => "One Time",
            RecurrenceType::Series => "Series (All Episodes)",
            RecurrenceType::Daily => "Daily",
            RecurrenceType::Weekly => "Weekly",
        }
    }
}

impl Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let recurrence = match self {
            RecurrenceType::Once => "once",
            RecurrenceType::Series => "series",
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
        };
        write!(f, "{}", recurrence)
    }
}

impl FromStr for RecurrenceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "once" => Ok(RecurrenceType::Once),
            "series" => Ok(RecurrenceType::Series),
            "daily" => Ok(RecurrenceType::Daily),
            "weekly" => Ok(RecurrenceType::Weekly),
            other => Err(format!("Unknown recurrence: {}", other)),
        }
    }
}
