use anyhow::{bail, Result};

use innerhue_lib::moods::MoodCategory;
use innerhue_lib::personalization::{
    CreateCombinationRequest, CreateSubcategoryRequest, CreateWordRequest, CustomColorPalette,
    COLOR_PALETTE_OPTIONS,
};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn show(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let personalization = &app.inner.personalization;
    let settings = personalization.settings();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "settings": settings,
                "stats": personalization.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let catalog = &app.inner.catalog;
            let tracking = if settings.enable_intensity_tracking { "on" } else { "off" };
            println!(
                "Intensity: default {}, tracking {}",
                settings.default_intensity, tracking
            );

            println!("\n{}", terminal::bold("Palettes", use_color));
            for palette in &settings.custom_palettes {
                println!(
                    "  {} {} {}",
                    terminal::swatch(&palette.primary_color, use_color),
                    terminal::swatch(&palette.glow_color, use_color),
                    catalog.display_name(&palette.mood_id)
                );
            }

            println!("\n{}", terminal::bold("Subcategories", use_color));
            for sub in &settings.subcategories {
                println!(
                    "  {} > {} {}",
                    catalog.display_name(&sub.parent_mood_id),
                    sub.name,
                    terminal::dim(&sub.id, use_color)
                );
            }

            println!("\n{}", terminal::bold("Combinations", use_color));
            for combo in &settings.mood_combinations {
                let members: Vec<String> =
                    combo.mood_ids.iter().map(|id| catalog.display_name(id)).collect();
                println!(
                    "  {} {} ({}) {}",
                    combo.emoji.as_deref().unwrap_or(""),
                    combo.name,
                    members.join(" + "),
                    terminal::dim(&combo.id, use_color)
                );
            }

            println!("\n{}", terminal::bold("Vocabulary", use_color));
            for word in &settings.custom_vocabulary {
                println!(
                    "  {} {} {}",
                    word.word,
                    word.definition.as_deref().unwrap_or(""),
                    terminal::dim(&word.id, use_color)
                );
            }
        }
    }

    Ok(())
}

pub fn palette(
    app: &App,
    mood: &str,
    preset: Option<&str>,
    colors: Option<(String, String)>,
    remove: bool,
) -> Result<()> {
    let mood = app.find_mood(mood)?;
    let personalization = &app.inner.personalization;

    if remove {
        if !personalization.remove_custom_palette(&mood.id) {
            bail!("{} has no custom palette", mood.name);
        }
        println!("Restored default colors for {}", mood.name);
        return Ok(());
    }

    let palette = match (preset, colors) {
        (Some(preset), _) => personalization.apply_palette_preset(&mood.id, preset)?,
        (None, Some((primary_color, glow_color))) => {
            let palette = CustomColorPalette {
                mood_id: mood.id.clone(),
                primary_color,
                glow_color,
            };
            personalization.set_custom_palette(palette.clone())?;
            palette
        }
        (None, None) => {
            let names: Vec<&str> = COLOR_PALETTE_OPTIONS.iter().map(|p| p.name).collect();
            println!("Presets: {}", names.join(", "));
            return Ok(());
        }
    };

    println!(
        "{} now uses {} / {}",
        mood.name, palette.primary_color, palette.glow_color
    );
    Ok(())
}

pub fn add_subcategory(
    app: &App,
    mood: &str,
    name: &str,
    emoji: Option<String>,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let mood = app.find_mood(mood)?;
    let subcategory = app.inner.personalization.add_subcategory(CreateSubcategoryRequest {
        name: name.to_string(),
        parent_mood_id: mood.id,
        emoji,
        description,
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&subcategory)?),
        OutputFormat::Plain => println!("Added {} ({})", subcategory.name, subcategory.id),
    }
    Ok(())
}

pub fn subcategory_suggestions(app: &App, mood: &str) -> Result<()> {
    let mood = app.find_mood(mood)?;
    let suggestions = app
        .inner
        .personalization
        .unused_subcategory_suggestions(&mood.id);

    if suggestions.is_empty() {
        println!("No suggestions for {}", mood.name);
    } else {
        println!("Suggestions for {}: {}", mood.name, suggestions.join(", "));
    }
    Ok(())
}

pub fn remove_subcategory(app: &App, id: &str) -> Result<()> {
    if !app.inner.personalization.remove_subcategory(id) {
        bail!("No subcategory with id '{}'", id);
    }
    println!("Removed subcategory {}", id);
    Ok(())
}

/// Add a combination from explicit members, or a suggested one by name
pub fn add_combination(
    app: &App,
    name: &str,
    moods: &[String],
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let personalization = &app.inner.personalization;

    let combination = if moods.is_empty() {
        match personalization.add_suggested_combination(name)? {
            Some(combination) => combination,
            None => {
                let names: Vec<&str> = personalization
                    .unused_combination_suggestions()
                    .iter()
                    .map(|s| s.name)
                    .collect();
                bail!(
                    "'{}' is not an available suggestion. Try one of: {}",
                    name,
                    names.join(", ")
                );
            }
        }
    } else {
        let mood_ids = moods
            .iter()
            .map(|query| app.find_mood(query).map(|m| m.id))
            .collect::<Result<Vec<_>>>()?;
        personalization.add_mood_combination(CreateCombinationRequest {
            name: name.to_string(),
            description,
            mood_ids,
            ..Default::default()
        })?
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&combination)?),
        OutputFormat::Plain => println!(
            "Added {} {} ({})",
            combination.emoji.as_deref().unwrap_or(""),
            combination.name,
            combination.id
        ),
    }
    Ok(())
}

pub fn remove_combination(app: &App, id: &str) -> Result<()> {
    if !app.inner.personalization.remove_mood_combination(id) {
        bail!("No combination with id '{}'", id);
    }
    println!("Removed combination {}", id);
    Ok(())
}

pub fn add_word(
    app: &App,
    word: &str,
    definition: Option<String>,
    category: Option<&str>,
    related: &[String],
    format: &OutputFormat,
) -> Result<()> {
    let category = match category {
        Some(name) => match MoodCategory::parse(name) {
            Some(category) => Some(category),
            None => bail!("Unknown category '{}'", name),
        },
        None => None,
    };
    let related_mood_ids = related
        .iter()
        .map(|query| app.find_mood(query).map(|m| m.id))
        .collect::<Result<Vec<_>>>()?;

    let entry = app.inner.personalization.add_custom_word(CreateWordRequest {
        word: word.to_string(),
        definition,
        related_mood_ids,
        category,
        ..Default::default()
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => println!("Added {} ({})", entry.word, entry.id),
    }
    Ok(())
}

pub fn search_words(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let results = app.inner.personalization.search_vocabulary(query);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No words matching '{}'", query);
            }
            for word in &results {
                match &word.definition {
                    Some(definition) => println!("  {}: {}", word.word, definition),
                    None => println!("  {}", word.word),
                }
            }
        }
    }
    Ok(())
}

pub fn remove_word(app: &App, id: &str) -> Result<()> {
    if !app.inner.personalization.remove_custom_word(id) {
        bail!("No word with id '{}'", id);
    }
    println!("Removed word {}", id);
    Ok(())
}

/// Apply any setting changes, then print the intensity history
pub fn intensity(
    app: &App,
    default: Option<i64>,
    tracking: Option<bool>,
    mood: Option<&str>,
    limit: Option<usize>,
    format: &OutputFormat,
) -> Result<()> {
    let personalization = &app.inner.personalization;

    if let Some(default) = default {
        personalization.set_default_intensity(default);
    }
    if let Some(enabled) = tracking {
        personalization.toggle_intensity_tracking(enabled);
    }

    let mood_id = match mood {
        Some(query) => Some(app.find_mood(query)?.id),
        None => None,
    };
    let history = personalization.get_intensity_history(mood_id.as_deref(), limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&history)?),
        OutputFormat::Plain => {
            let settings = personalization.settings();
            println!(
                "Default intensity {}, tracking {}",
                settings.default_intensity,
                if settings.enable_intensity_tracking { "on" } else { "off" }
            );
            for record in &history {
                println!(
                    "  {} {:<20} {}/10",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    app.inner.catalog.display_name(&record.mood_id),
                    record.intensity
                );
            }
        }
    }
    Ok(())
}

pub fn reset(app: &App) -> Result<()> {
    app.inner.personalization.reset_all_personalization();
    println!("Personalization reset to defaults");
    Ok(())
}
