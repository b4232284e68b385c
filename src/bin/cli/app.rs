use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use innerhue_lib::config::AppConfig;
use innerhue_lib::moods::MoodDefinition;
use innerhue_lib::InnerHue;

/// Shared application state for CLI commands
pub struct App {
    pub inner: InnerHue,
}

impl App {
    /// Open the stores from the given or default data directory
    pub fn new(data_dir: Option<&str>) -> Result<Self> {
        let config = match data_dir {
            Some(dir) => AppConfig::load_from_dir(&PathBuf::from(dir)),
            None => AppConfig::load().context("Failed to get data directory")?,
        };

        log::debug!("Using data directory {:?}", config.data_dir);
        Ok(Self {
            inner: InnerHue::open(config),
        })
    }

    /// Find a mood by id or name (case-insensitive), exact match first, then prefix
    pub fn find_mood(&self, query: &str) -> Result<MoodDefinition> {
        let moods = self.inner.catalog.get_all_moods();
        let query_lower = query.trim().to_lowercase();

        if let Some(mood) = moods
            .iter()
            .find(|m| m.id == query || m.name.to_lowercase() == query_lower)
        {
            return Ok(mood.clone());
        }

        let matches: Vec<&MoodDefinition> = moods
            .iter()
            .filter(|m| m.name.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!("No mood matching '{}'. Run `moods list` to see all moods.", query),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous mood name '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|m| format!("  - {} ({})", m.name, m.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}
