//! Mood personalization module

pub mod models;
pub mod storage;
pub mod suggestions;

pub use models::*;
pub use storage::PersonalizationStore;
pub use suggestions::{
    category_color, subcategory_suggestions, CombinationSuggestion, PalettePreset,
    COLOR_PALETTE_OPTIONS, COMBINATION_SUGGESTIONS,
};
