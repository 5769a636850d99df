pub mod recordable_targets;
pub mod recording_request_resolver;
pub mod recordings;
