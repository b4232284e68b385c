//! Mood catalog module

pub mod builtin;
pub mod catalog;
pub mod color;
pub mod models;

pub use catalog::{MoodCatalog, UNKNOWN_MOOD_LABEL};
pub use color::generate_glow_color;
pub use models::*;
