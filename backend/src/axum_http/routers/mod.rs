pub mod recordable_targets;
pub mod recordings;
