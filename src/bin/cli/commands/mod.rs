pub mod history;
pub mod moods;
pub mod personalize;
pub mod stats;
