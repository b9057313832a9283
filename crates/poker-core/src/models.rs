use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw 2-D grid of text cells, one inner `Vec` per spreadsheet row.
///
/// Rows may be ragged; a missing trailing cell reads the same as an empty one.
pub type Grid = Vec<Vec<String>>;

/// One player's result in one game instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Calendar day the game was played.
    pub date: NaiveDate,
    /// Player display name, used as the grouping key.
    pub player: String,
    /// Amount staked that day; shared by every player at the table.
    pub buy_in: f64,
    /// Amount won (positive) or lost (negative).
    pub profit: f64,
}

/// Externally supplied lifetime figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: String,
    /// Authoritative lifetime total when present.
    pub total_winnings: f64,
    /// Informational only; never cross-checked against derived sessions.
    pub session_count: u32,
}

/// Output of the raw grid parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedGrid {
    pub sessions: Vec<Session>,
    pub player_summaries: Vec<PlayerSummary>,
}

impl ParsedGrid {
    /// `true` when the grid produced neither sessions nor summaries.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.player_summaries.is_empty()
    }
}

/// Lifetime statistics for one player, computed fresh on every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player: String,
    /// Number of sessions played.
    pub sessions: u32,
    /// Sum of session profits.
    pub total_profit: f64,
    /// Sum of session buy-ins.
    pub total_buy_in: f64,
    /// Plain maximum of per-session profit; negative when the player never
    /// had a winning session.
    pub highest_single_winning: f64,
    /// Summary total when one exists for this player, else `total_profit`.
    pub total_winnings: f64,
    /// `total_profit / sessions`.
    pub avg_profit: f64,
    /// `total_profit / total_buy_in * 100`, or `0` when nothing was staked.
    pub roi: f64,
}

/// One point of a player's cumulative profit series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Running total after this session.
    pub cumulative: f64,
    /// This session's own profit.
    pub day_profit: f64,
}

/// Headline result of a player's year in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// `Won` only for a strictly positive total.
    pub fn from_total(total_winnings: f64) -> Self {
        if total_winnings > 0.0 {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won => write!(f, "Won"),
            Outcome::Lost => write!(f, "Lost"),
        }
    }
}
