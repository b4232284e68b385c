mod app;
mod commands;
mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "innerhue-cli", about = "InnerHue mood journal CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Mood catalog
    #[command(subcommand)]
    Moods(MoodsCommand),

    /// Record one or more moods
    Log {
        /// Mood ids or names (case-insensitive)
        #[arg(required = true)]
        moods: Vec<String>,
        /// Intensity 1-10 (clamped)
        #[arg(long)]
        intensity: Option<i64>,
    },

    /// Show, delete or clear mood history
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
        /// Maximum entries to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show mood statistics and distribution
    Stats,

    /// Personalization settings
    #[command(subcommand)]
    Personalize(PersonalizeCommand),
}

#[derive(Subcommand)]
enum MoodsCommand {
    /// List all moods
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Create a custom mood
    Add {
        name: String,
        /// Primary color (hex)
        #[arg(long, default_value = "#FFD93D")]
        color: String,
        #[arg(long, default_value = "😊")]
        emoji: String,
        #[arg(long, default_value = "positive")]
        category: String,
    },

    /// Delete a custom mood
    Remove { id: String },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Delete one entry
    Delete { id: String },
    /// Delete every entry
    Clear,
}

#[derive(Subcommand)]
enum PersonalizeCommand {
    /// Show all personalization settings
    Show,

    /// Set or remove a mood's color palette
    Palette {
        mood: String,
        /// Preset name (e.g. Ocean)
        #[arg(long, conflicts_with_all = ["primary", "remove"])]
        preset: Option<String>,
        #[arg(long, requires = "glow")]
        primary: Option<String>,
        #[arg(long)]
        glow: Option<String>,
        #[arg(long)]
        remove: bool,
    },

    /// Add or remove a subcategory
    Subcategory {
        mood: String,
        /// Name of the new subcategory (omit to list suggestions)
        name: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the subcategory with this id instead
        #[arg(long)]
        remove: Option<String>,
    },

    /// Add or remove a mood combination
    Combo {
        /// Combination name (a suggestion name if no moods are given)
        name: String,
        /// 2-4 member moods
        moods: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the combination with this id instead
        #[arg(long)]
        remove: bool,
    },

    /// Add, search or remove vocabulary words
    Word {
        word: String,
        #[arg(long)]
        definition: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated related moods
        #[arg(long)]
        related: Option<String>,
        /// Search instead of adding
        #[arg(long)]
        search: bool,
        /// Remove the word with this id instead
        #[arg(long)]
        remove: bool,
    },

    /// Intensity settings and history
    Intensity {
        /// Set the default intensity
        #[arg(long)]
        default: Option<i64>,
        /// Enable or disable tracking
        #[arg(long)]
        tracking: Option<bool>,
        /// Show history for one mood
        #[arg(long)]
        mood: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Restore defaults and clear intensity history
    Reset,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Moods(MoodsCommand::List { category }) => {
            commands::moods::list(&app, category.as_deref(), &cli.format, use_color)?;
        }
        Command::Moods(MoodsCommand::Add { name, color, emoji, category }) => {
            commands::moods::add(&app, &name, &color, &emoji, &category, &cli.format)?;
        }
        Command::Moods(MoodsCommand::Remove { id }) => {
            commands::moods::remove(&app, &id)?;
        }
        Command::Log { moods, intensity } => {
            commands::history::log(&app, &moods, intensity, &cli.format)?;
        }
        Command::History { action: None, limit } => {
            commands::history::show(&app, limit, &cli.format, use_color)?;
        }
        Command::History { action: Some(HistoryCommand::Delete { id }), .. } => {
            commands::history::delete(&app, &id)?;
        }
        Command::History { action: Some(HistoryCommand::Clear), .. } => {
            commands::history::clear(&app)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Personalize(command) => {
            run_personalize(&app, command, &cli.format, use_color)?;
        }
    }

    if app.inner.store.is_degraded() {
        eprintln!("warning: storage unavailable, changes from this run were not saved");
    }

    Ok(())
}

fn run_personalize(
    app: &app::App,
    command: PersonalizeCommand,
    format: &OutputFormat,
    use_color: bool,
) -> anyhow::Result<()> {
    use commands::personalize;

    match command {
        PersonalizeCommand::Show => personalize::show(app, format, use_color),
        PersonalizeCommand::Palette { mood, preset, primary, glow, remove } => {
            personalize::palette(app, &mood, preset.as_deref(), primary.zip(glow), remove)
        }
        PersonalizeCommand::Subcategory { mood, name, emoji, description, remove } => {
            match (remove, name) {
                (Some(id), _) => personalize::remove_subcategory(app, &id),
                (None, Some(name)) => {
                    personalize::add_subcategory(app, &mood, &name, emoji, description, format)
                }
                (None, None) => personalize::subcategory_suggestions(app, &mood),
            }
        }
        PersonalizeCommand::Combo { name, moods, description, remove } => {
            if remove {
                personalize::remove_combination(app, &name)
            } else {
                personalize::add_combination(app, &name, &moods, description, format)
            }
        }
        PersonalizeCommand::Word { word, definition, category, related, search, remove } => {
            if remove {
                personalize::remove_word(app, &word)
            } else if search {
                personalize::search_words(app, &word, format)
            } else {
                let related = split_list(related.as_deref());
                personalize::add_word(app, &word, definition, category.as_deref(), &related, format)
            }
        }
        PersonalizeCommand::Intensity { default, tracking, mood, limit } => {
            personalize::intensity(app, default, tracking, mood.as_deref(), limit, format)
        }
        PersonalizeCommand::Reset => personalize::reset(app),
    }
}

/// Split a comma-separated list, dropping blanks
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Check if stdout is a terminal
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
