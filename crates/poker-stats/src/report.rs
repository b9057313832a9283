//! Plain-text rendering of pipeline output.
//!
//! The leaderboard mirrors the columns of the original stats table; the
//! series view prints each player's points plus the shared date domain.

use std::fmt::Write as _;

use poker_core::formatting::{format_currency, format_percent, format_signed_currency};
use poker_core::models::PlayerStat;
use poker_data::analysis::{StatsReport, YearInReview};
use poker_data::series::CumulativeSeries;

const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Render the leaderboard table, or an explanatory line when empty.
pub fn render_summary(report: &StatsReport) -> String {
    if report.stats.is_empty() {
        return format!(
            "No poker sessions found for {}, try a different year.\n",
            report.metadata.year_filter
        );
    }

    let name_width = report
        .stats
        .iter()
        .map(|s| s.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>8}  {:>14}  {:>12}  {:>8}",
        "Player", "Sessions", "Total Winnings", "Avg Profit", "ROI"
    );
    for stat in &report.stats {
        let _ = writeln!(out, "{}", summary_line(stat, name_width));
    }
    let _ = writeln!(
        out,
        "\n{} sessions over {} dates ({})",
        report.metadata.sessions_in_view, report.metadata.dates, report.metadata.year_filter
    );
    out
}

fn summary_line(stat: &PlayerStat, name_width: usize) -> String {
    format!(
        "{:<name_width$}  {:>8}  {:>14}  {:>12}  {:>8}",
        stat.player,
        stat.sessions,
        format_currency(stat.total_winnings),
        format_currency(stat.avg_profit),
        format_percent(stat.roi, 1),
    )
}

/// Render every player's cumulative series over the shared domain.
pub fn render_series(series: &CumulativeSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cumulative profit/loss over {} sessions",
        series.domain.len()
    );

    for (player, points) in &series.players {
        let _ = writeln!(out, "\n{}", player);
        for point in points {
            let _ = writeln!(
                out,
                "  {:>10}  {:>10}  ({})",
                point.date.format(DATE_FORMAT).to_string(),
                format_signed_currency(point.day_profit, 0),
                format_signed_currency(point.cumulative, 0),
            );
        }
    }
    out
}

/// Render a player's year in review card.
pub fn render_wrapped(review: &YearInReview) -> String {
    let stat = &review.stat;
    let mut out = String::new();
    let _ = writeln!(out, "{}'s Poker Wrapped", stat.player);
    let _ = writeln!(
        out,
        "  This year you {}: {}",
        review.outcome,
        format_currency(stat.total_winnings.abs())
    );
    let _ = writeln!(out, "  Sessions played: {}", stat.sessions);
    let _ = writeln!(
        out,
        "  {}: {}",
        review.biggest_session_label,
        format_currency(stat.highest_single_winning.abs())
    );
    let _ = writeln!(
        out,
        "  ROI: {} (avg {} per game)",
        format_percent(stat.roi, 1),
        format_currency(stat.avg_profit)
    );
    let _ = writeln!(out, "  Win rate: {}", format_percent(review.win_rate, 0));
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
