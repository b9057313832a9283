//! Cumulative profit series for charting.
//!
//! Each player gets a sparse, date-sorted series with one point per session
//! they played. All players share one x-axis: the sorted union of every
//! session date ([`CumulativeSeries::domain`]). A chart draws a player's line
//! across dates they skipped by holding their last cumulative value, which
//! [`CumulativeSeries::value_at`] makes explicit.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use poker_core::dates::{calendar_key, same_calendar_day};
use poker_core::models::{SeriesPoint, Session};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ── CumulativeSeries ──────────────────────────────────────────────────────────

/// Per-player cumulative series plus the shared date domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    /// Player name → date-sorted points, one per session played.
    pub players: BTreeMap<String, Vec<SeriesPoint>>,
    /// Every distinct calendar day across all players, ascending.
    pub domain: Vec<NaiveDate>,
}

/// One x-axis position of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    /// Only players who played on `date`. When a player has several
    /// sessions that day the point carries the day's last cumulative value
    /// and the day's net profit.
    pub points: BTreeMap<String, SeriesPoint>,
}

impl CumulativeSeries {
    /// Series for `player`, or `None` if they have no sessions.
    pub fn player(&self, player: &str) -> Option<&[SeriesPoint]> {
        self.players.get(player).map(Vec::as_slice)
    }

    /// Cumulative profit for `player` as of `date`, held from their most
    /// recent session on or before that day.
    ///
    /// `None` before the player's first session or for an unknown player.
    pub fn value_at(&self, player: &str, date: &NaiveDate) -> Option<f64> {
        let day = calendar_key(date);
        self.players
            .get(player)?
            .iter()
            .take_while(|p| calendar_key(&p.date) <= day)
            .last()
            .map(|p| p.cumulative)
    }

    /// One row per domain date, in the sparse shape a line chart consumes.
    pub fn chart_rows(&self) -> Vec<ChartRow> {
        self.domain
            .iter()
            .map(|date| {
                let mut points = BTreeMap::new();
                for (player, series) in &self.players {
                    if let Some(point) = day_point(series, date) {
                        points.insert(player.clone(), point);
                    }
                }
                ChartRow {
                    date: *date,
                    points,
                }
            })
            .collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Derive every player's cumulative profit series and the shared domain.
///
/// Sessions are sorted per player by calendar day with a stable sort, so two
/// sessions on the same day keep their input order. The Nth point's
/// `cumulative` is the sum of the player's first N profits.
pub fn derive_series(sessions: &[Session]) -> CumulativeSeries {
    let mut grouped: BTreeMap<&str, Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        grouped
            .entry(session.player.as_str())
            .or_default()
            .push(session);
    }

    let players: BTreeMap<String, Vec<SeriesPoint>> = grouped
        .into_iter()
        .map(|(player, mut played)| {
            played.sort_by_key(|s| calendar_key(&s.date));

            let mut cumulative = 0.0;
            let points = played
                .iter()
                .map(|s| {
                    cumulative += s.profit;
                    SeriesPoint {
                        date: s.date,
                        cumulative,
                        day_profit: s.profit,
                    }
                })
                .collect();

            (player.to_string(), points)
        })
        .collect();

    let domain = date_domain(sessions);

    debug!(
        "derived series for {} players over {} dates",
        players.len(),
        domain.len()
    );

    CumulativeSeries { players, domain }
}

/// Sorted union of distinct calendar days across all sessions.
pub fn date_domain(sessions: &[Session]) -> Vec<NaiveDate> {
    let mut days: BTreeMap<(i32, u32, u32), NaiveDate> = BTreeMap::new();
    for session in sessions {
        days.entry(calendar_key(&session.date))
            .or_insert(session.date);
    }
    days.into_values().collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Collapse a player's points on `date` into one chart point.
fn day_point(series: &[SeriesPoint], date: &NaiveDate) -> Option<SeriesPoint> {
    series
        .iter()
        .filter(|p| same_calendar_day(&p.date, date))
        .fold(None, |acc: Option<SeriesPoint>, p| {
            Some(match acc {
                None => p.clone(),
                Some(prev) => SeriesPoint {
                    date: p.date,
                    cumulative: p.cumulative,
                    day_profit: prev.day_profit + p.day_profit,
                },
            })
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
