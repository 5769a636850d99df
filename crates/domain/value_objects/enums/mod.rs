pub mod recordable_types;
pub mod recording_statuses;
pub mod recurrence_types;
pub mod sort_order;
