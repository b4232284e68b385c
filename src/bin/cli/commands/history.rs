use anyhow::{bail, Result};
use chrono::Utc;

use innerhue_lib::history::relative_time_label;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

/// Record each mood in order; the intensity applies to all of them
pub fn log(app: &App, moods: &[String], intensity: Option<i64>, format: &OutputFormat) -> Result<()> {
    // Resolve everything first so a typo records nothing
    let resolved = moods
        .iter()
        .map(|query| app.find_mood(query))
        .collect::<Result<Vec<_>>>()?;

    let entries: Vec<_> = resolved
        .iter()
        .map(|mood| app.inner.record_mood(&mood.id, intensity))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for mood in &resolved {
                println!("Logged {} {}", mood.emoji, mood.name);
            }
        }
    }

    Ok(())
}

pub fn show(app: &App, limit: Option<usize>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries = match limit {
        Some(limit) => app.inner.history.recent_entries(limit),
        None => app.inner.recent_entries(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No moods logged yet.");
                return Ok(());
            }

            let now = Utc::now();
            for entry in &entries {
                let name = entry
                    .emotion
                    .clone()
                    .unwrap_or_else(|| app.inner.catalog.display_name(entry.mood_key()));
                let swatch = entry
                    .color
                    .as_deref()
                    .map(|c| terminal::swatch(c, use_color))
                    .unwrap_or_default();
                println!(
                    "  {} {:<20} {:<16} {}",
                    swatch,
                    name,
                    relative_time_label(entry.timestamp, now),
                    terminal::dim(&entry.id, use_color)
                );
            }
        }
    }

    Ok(())
}

pub fn delete(app: &App, id: &str) -> Result<()> {
    if !app.inner.history.delete_entry(id) {
        bail!("No history entry with id '{}'", id);
    }
    println!("Deleted entry {}", id);
    Ok(())
}

pub fn clear(app: &App) -> Result<()> {
    let count = app.inner.history.entries().len();
    app.inner.history.clear_history();
    println!("Cleared {} entries", count);
    Ok(())
}
