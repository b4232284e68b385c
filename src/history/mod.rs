//! Mood history module

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{compute_stats, relative_time_label, MoodHistory, FALLBACK_CHART_COLOR};
