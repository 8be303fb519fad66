pub mod config;
pub mod geometry;
pub mod journal;
pub mod macros;
pub mod wheel;
