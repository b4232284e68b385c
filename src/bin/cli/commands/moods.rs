use anyhow::{bail, Result};

use innerhue_lib::moods::{CustomMoodDraft, MoodCategory};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn list(app: &App, category: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let moods = match category {
        Some(name) => {
            let Some(category) = MoodCategory::parse(name) else {
                bail!("Unknown category '{}'", name);
            };
            app.inner.catalog.get_moods_by_category(category)
        }
        None => app.inner.catalog.get_all_moods(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&moods)?);
        }
        OutputFormat::Plain => {
            for category in MoodCategory::ALL {
                let in_category: Vec<_> = moods.iter().filter(|m| m.category == category).collect();
                if in_category.is_empty() {
                    continue;
                }

                println!("{}", terminal::bold(category.as_str(), use_color));
                for mood in in_category {
                    let custom = if mood.is_custom { " [custom]" } else { "" };
                    println!(
                        "  {} {} {} {}{}",
                        terminal::swatch(&mood.color, use_color),
                        mood.emoji,
                        mood.name,
                        terminal::dim(&format!("({})", mood.id), use_color),
                        custom
                    );
                }
            }
        }
    }

    Ok(())
}

pub fn add(
    app: &App,
    name: &str,
    color: &str,
    emoji: &str,
    category: &str,
    format: &OutputFormat,
) -> Result<()> {
    let Some(category) = MoodCategory::parse(category) else {
        bail!("Unknown category '{}'", category);
    };

    let mood = app.inner.catalog.save_custom_mood(CustomMoodDraft {
        name: name.to_string(),
        emoji: emoji.to_string(),
        color: color.to_string(),
        category,
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mood)?),
        OutputFormat::Plain => println!("Created {} {} ({})", mood.emoji, mood.name, mood.id),
    }

    Ok(())
}

pub fn remove(app: &App, id: &str) -> Result<()> {
    if !app.inner.catalog.delete_custom_mood(id) {
        bail!("No custom mood with id '{}'", id);
    }
    println!("Deleted {}", id);
    Ok(())
}
