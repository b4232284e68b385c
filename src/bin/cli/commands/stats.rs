use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.inner.history.get_stats();
    let distribution = app
        .inner
        .history
        .mood_distribution(&app.inner.catalog, app.inner.config.distribution_limit);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "distribution": distribution,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::bold("Mood statistics", use_color));
            println!("  Total entries:  {}", stats.total_entries);
            println!("  Today:          {}", stats.today_entries);
            println!("  Past 7 days:    {}", stats.week_entries);

            let most_common = stats
                .most_common_mood
                .as_deref()
                .map(|id| app.inner.catalog.display_name(id))
                .unwrap_or_else(|| "-".to_string());
            println!("  Most common:    {}", most_common);

            if !distribution.is_empty() {
                println!();
                println!("{}", terminal::bold("Distribution", use_color));
                for line in terminal::render_distribution(&distribution, use_color) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
