pub mod display;
pub mod enums;
pub mod recordable_targets;
pub mod recording_requests;
pub mod recordings;
