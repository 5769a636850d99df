pub mod channels;
pub mod episodes;
pub mod recordings;
pub mod series;
pub mod stream_profiles;
