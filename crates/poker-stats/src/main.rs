mod bootstrap;
mod report;

use anyhow::{Context, Result};
use poker_core::settings::Settings;
use poker_core::StatsError;
use poker_data::analysis::{analyze, year_in_review, YearFilter};
use poker_data::reader::{load_grid, SourceFormat};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("poker-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Year: {}, Output: {}",
        settings.view,
        settings.year,
        settings.output
    );

    let Some(input) = settings.input.as_ref() else {
        return Err(StatsError::NoInput.into());
    };
    let format: SourceFormat = settings.source.parse()?;
    let filter: YearFilter = settings.year.parse()?;

    // A read failure is the only fatal path; the pipeline never sees a grid.
    let grid = load_grid(input, format).with_context(|| {
        format!(
            "Failed to load poker stats from {}. Make sure the export exists and is readable.",
            input.display()
        )
    })?;

    let report = analyze(&grid, filter);
    let as_json = settings.output == "json";

    match settings.view.as_str() {
        "summary" => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render_summary(&report));
            }
        }

        "series" => {
            if as_json {
                let payload = serde_json::json!({
                    "domain": report.series.domain,
                    "players": report.series.players,
                    "rows": report.series.chart_rows(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", report::render_series(&report.series));
            }
        }

        "wrapped" => {
            let slug = settings.player.as_deref().ok_or_else(|| {
                StatsError::Config("--player is required for the wrapped view".to_string())
            })?;
            let review = year_in_review(&report.sessions, &report.player_summaries, slug)
                .ok_or_else(|| StatsError::PlayerNotFound(slug.to_string()))?;

            if as_json {
                println!("{}", serde_json::to_string_pretty(&review)?);
            } else {
                print!("{}", report::render_wrapped(&review));
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
