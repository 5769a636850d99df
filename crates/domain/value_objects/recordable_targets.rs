use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::{
    entities::{channels::ChannelEntity, episodes::EpisodeEntity, series::SeriesEntity},
    value_objects::enums::{recordable_types::RecordableType, sort_order::SortOrder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub i64);

/// Reference to the entity a recording captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordableTarget {
    Channel(ChannelId),
    Episode(EpisodeId),
    Series(SeriesId),
}

impl RecordableTarget {
    pub fn new(recordable_type: RecordableType, id: i64) -> Self {
        match recordable_type {
            RecordableType::Channel => RecordableTarget::Channel(ChannelId(id)),
            RecordableType::Episode => RecordableTarget::Episode(EpisodeId(id)),
            RecordableType::Series => RecordableTarget::Series(SeriesId(id)),
        }
    }

    pub fn recordable_type(&self) -> RecordableType {
        match self {
            RecordableTarget::Channel(_) => RecordableType::Channel,
            RecordableTarget::Episode(_) => RecordableType::Episode,
            RecordableTarget::Series(_) => RecordableType::Series,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            RecordableTarget::Channel(ChannelId(id))
            | RecordableTarget::Episode(EpisodeId(id))
            | RecordableTarget::Series(SeriesId(id)) => *id,
        }
    }
}

impl Display for RecordableTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.recordable_type(), self.id())
    }
}

/// Human readable name of a recordable entity.
///
/// Channels and episodes are labelled by their `title`, series by their `name`.
pub trait Recordable {
    fn label(&self) -> &str;
}

impl Recordable for ChannelEntity {
    fn label(&self) -> &str {
        &self.title
    }
}

impl Recordable for EpisodeEntity {
    fn label(&self) -> &str {
        &self.title
    }
}

impl Recordable for SeriesEntity {
    fn label(&self) -> &str {
        &self.name
    }
}

/// A target that was found for the caller, carrying its loaded row.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget {
    Channel(ChannelEntity),
    Episode(EpisodeEntity),
    Series(SeriesEntity),
}

impl ResolvedTarget {
    pub fn target(&self) -> RecordableTarget {
        match self {
            ResolvedTarget::Channel(channel) => RecordableTarget::Channel(ChannelId(channel.id)),
            ResolvedTarget::Episode(episode) => RecordableTarget::Episode(EpisodeId(episode.id)),
            ResolvedTarget::Series(series) => RecordableTarget::Series(SeriesId(series.id)),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ResolvedTarget::Channel(channel) => channel.label(),
            ResolvedTarget::Episode(episode) => episode.label(),
            ResolvedTarget::Series(series) => series.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetLabel {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListTargetsFilter {
    pub search: Option<String>,
    pub playlist_id: Option<i64>,
    pub group_id: Option<i64>,
    pub series_id: Option<i64>,
    pub category_id: Option<i64>,
    pub limit: Option<i64>,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelPickerRow {
    pub id: i64,
    pub title: String,
    pub playlist_name: String,
    pub group_name: Option<String>,
    pub has_logo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodePickerRow {
    pub id: i64,
    pub title: String,
    pub series_id: i64,
    pub series_name: String,
    pub playlist_name: String,
    pub season: Option<i32>,
    pub episode_num: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPickerRow {
    pub id: i64,
    pub name: String,
    pub playlist_name: String,
    pub category_name: Option<String>,
    pub episodes_count: i64,
}
