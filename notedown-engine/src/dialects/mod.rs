//! Built-in dialect drivers

pub mod markdown;
pub mod wiki;
