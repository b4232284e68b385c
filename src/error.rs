//! Validation error types

use thiserror::Error;

/// Input that would violate an entity invariant.
///
/// Raised before anything is written, so a failed call never leaves a
/// partial change behind. The `Display` text is meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a mood name")]
    EmptyMoodName,

    #[error("A mood with this name already exists")]
    DuplicateMoodName(String),

    #[error("Please enter a name")]
    EmptyName,

    #[error("Please enter a word")]
    EmptyWord,

    #[error("A combination needs between 2 and 4 moods, got {0}")]
    CombinationSize(usize),

    #[error("A combination cannot list the same mood twice: {0}")]
    DuplicateCombinationMood(String),

    #[error("Not a valid hex color: {0}")]
    InvalidColor(String),

    #[error("Unknown palette preset: {0}")]
    UnknownPreset(String),
}

impl From<ValidationError> for String {
    fn from(err: ValidationError) -> Self {
        err.to_string()
    }
}

/// Result type alias for operations that validate user input
pub type Result<T> = std::result::Result<T, ValidationError>;
