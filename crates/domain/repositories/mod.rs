pub mod recordable_targets;
pub mod recordings;
pub mod stream_profiles;
