//! Top-level analysis pipeline.
//!
//! Parses a raw grid, applies the year filter, and feeds the surviving
//! sessions to both the aggregator and the series deriver, returning a
//! [`StatsReport`] ready for display. Also hosts the per-player year in
//! review.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Datelike;
use poker_core::models::{Outcome, PlayerStat, PlayerSummary, Session};
use poker_core::StatsError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregator::{aggregate, leaderboard};
use crate::grid::parse_grid;
use crate::series::{derive_series, CumulativeSeries};

// ── YearFilter ────────────────────────────────────────────────────────────────

/// Which sessions to keep, by calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl FromStr for YearFilter {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        s.parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| StatsError::Config(format!("invalid year \"{}\"", s)))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "all years"),
            YearFilter::Year(y) => write!(f, "{}", y),
        }
    }
}

impl YearFilter {
    fn matches(&self, session: &Session) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => session.date.year() == *y,
        }
    }
}

/// Distinct years with at least one session, newest first.
pub fn available_years(sessions: &[Session]) -> Vec<i32> {
    let years: BTreeSet<i32> = sessions.iter().map(|s| s.date.year()).collect();
    years.into_iter().rev().collect()
}

/// Sessions that pass `filter`, in input order.
pub fn filter_sessions(sessions: &[Session], filter: YearFilter) -> Vec<Session> {
    sessions
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}

// ── StatsReport ───────────────────────────────────────────────────────────────

/// Counts describing one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub rows_read: usize,
    pub sessions_parsed: usize,
    pub sessions_in_view: usize,
    pub players: usize,
    pub dates: usize,
    pub year_filter: YearFilter,
}

/// Everything a presentation layer needs for one grid and year filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Sessions surviving the year filter.
    pub sessions: Vec<Session>,
    /// Lifetime summaries; never filtered by year.
    pub player_summaries: Vec<PlayerSummary>,
    /// Leaderboard order: highest total winnings first.
    pub stats: Vec<PlayerStat>,
    pub series: CumulativeSeries,
    /// Years present in the unfiltered sessions, newest first.
    pub years: Vec<i32>,
    pub metadata: ReportMetadata,
}

/// Run the full pipeline over a raw grid.
///
/// 1. Parse the grid into sessions and summaries.
/// 2. Keep the sessions in `filter`'s year.
/// 3. Aggregate per-player stats (summaries stay lifetime figures).
/// 4. Derive the cumulative series and date domain.
pub fn analyze(rows: &[Vec<String>], filter: YearFilter) -> StatsReport {
    let parsed = parse_grid(rows);
    let years = available_years(&parsed.sessions);
    let sessions = filter_sessions(&parsed.sessions, filter);

    let stats = leaderboard(aggregate(&sessions, &parsed.player_summaries));
    let series = derive_series(&sessions);

    let metadata = ReportMetadata {
        rows_read: rows.len(),
        sessions_parsed: parsed.sessions.len(),
        sessions_in_view: sessions.len(),
        players: stats.len(),
        dates: series.domain.len(),
        year_filter: filter,
    };

    info!(
        "analysis complete: {} of {} sessions for {}, {} players",
        metadata.sessions_in_view, metadata.sessions_parsed, filter, metadata.players
    );

    StatsReport {
        sessions,
        player_summaries: parsed.player_summaries,
        stats,
        series,
        years,
        metadata,
    }
}

// ── Year in review ────────────────────────────────────────────────────────────

/// One player's "wrapped" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearInReview {
    pub stat: PlayerStat,
    /// Text before the first space of the display name.
    pub first_name: String,
    /// Share of sessions with a positive profit, as a percentage.
    pub win_rate: f64,
    pub outcome: Outcome,
    /// `"Biggest Win"` or `"Biggest Loss"`, from the sign of
    /// `highest_single_winning`.
    pub biggest_session_label: String,
}

/// URL-style slug for a display name: lower-case, whitespace runs → `_`.
pub fn player_slug(name: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    let ws = WS.get_or_init(|| Regex::new(r"\s+").expect("regex is valid"));
    ws.replace_all(&name.to_lowercase(), "_").into_owned()
}

/// Percentage of `player`'s sessions with `profit > 0`; `0` with none.
pub fn win_rate(sessions: &[Session], player: &str) -> f64 {
    let (played, won) = sessions
        .iter()
        .filter(|s| s.player == player)
        .fold((0u32, 0u32), |(played, won), s| {
            (played + 1, won + u32::from(s.profit > 0.0))
        });
    if played == 0 {
        return 0.0;
    }
    f64::from(won) / f64::from(played) * 100.0
}

/// Build the year in review for the player whose slug is `slug`.
///
/// `None` when no player with sessions matches.
pub fn year_in_review(
    sessions: &[Session],
    summaries: &[PlayerSummary],
    slug: &str,
) -> Option<YearInReview> {
    let wanted = player_slug(slug.trim());
    let stat = aggregate(sessions, summaries)
        .into_iter()
        .find(|s| player_slug(&s.player) == wanted)?;

    debug!("year in review for \"{}\"", stat.player);

    let first_name = stat
        .player
        .split(' ')
        .next()
        .unwrap_or(stat.player.as_str())
        .to_string();
    let biggest_session_label = if stat.highest_single_winning > 0.0 {
        "Biggest Win"
    } else {
        "Biggest Loss"
    }
    .to_string();

    Some(YearInReview {
        win_rate: win_rate(sessions, &stat.player),
        outcome: Outcome::from_total(stat.total_winnings),
        first_name,
        biggest_session_label,
        stat,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
