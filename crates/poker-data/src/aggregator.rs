//! Per-player lifetime statistics.
//!
//! Folds [`Session`] records into one [`PlayerStat`] per player, merging in
//! the externally supplied [`PlayerSummary`] totals where they exist.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use poker_core::models::{PlayerStat, PlayerSummary, Session};
use tracing::debug;

// ── PlayerTotals ──────────────────────────────────────────────────────────────

/// Running totals for one player while sessions are being folded.
#[derive(Debug, Clone)]
struct PlayerTotals {
    sessions: u32,
    total_profit: f64,
    total_buy_in: f64,
    highest_single_winning: f64,
}

impl Default for PlayerTotals {
    fn default() -> Self {
        Self {
            sessions: 0,
            total_profit: 0.0,
            total_buy_in: 0.0,
            // Any real profit beats this, including losses.
            highest_single_winning: f64::NEG_INFINITY,
        }
    }
}

impl PlayerTotals {
    fn add_session(&mut self, session: &Session) {
        self.sessions += 1;
        self.total_profit += session.profit;
        self.total_buy_in += session.buy_in;
        self.highest_single_winning = self.highest_single_winning.max(session.profit);
    }

    /// Finish into a [`PlayerStat`]. `total_winnings` is already resolved.
    fn into_stat(self, player: String, total_winnings: f64) -> PlayerStat {
        // A group only exists once it has seen a session, so `sessions >= 1`.
        let avg_profit = self.total_profit / f64::from(self.sessions);
        let roi = if self.total_buy_in == 0.0 {
            0.0
        } else {
            self.total_profit / self.total_buy_in * 100.0
        };

        PlayerStat {
            player,
            sessions: self.sessions,
            total_profit: self.total_profit,
            total_buy_in: self.total_buy_in,
            highest_single_winning: self.highest_single_winning,
            total_winnings,
            avg_profit,
            roi,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Aggregate sessions into one [`PlayerStat`] per player that has sessions.
///
/// A player's `total_winnings` is the matching summary's figure when a
/// summary with the same name exists (the first one wins on duplicates),
/// otherwise the summed session profit. Players that appear only in
/// `summaries` produce nothing.
///
/// Pure: identical inputs give value-equal output. The result is ordered by
/// player name; use [`leaderboard`] for display order.
pub fn aggregate(sessions: &[Session], summaries: &[PlayerSummary]) -> Vec<PlayerStat> {
    let mut groups: BTreeMap<&str, PlayerTotals> = BTreeMap::new();
    for session in sessions {
        groups
            .entry(session.player.as_str())
            .or_default()
            .add_session(session);
    }

    let authoritative = summary_totals(summaries);

    let stats: Vec<PlayerStat> = groups
        .into_iter()
        .map(|(player, totals)| {
            let total_winnings = match authoritative.get(player) {
                Some(&summary_total) => summary_total,
                None => totals.total_profit,
            };
            totals.into_stat(player.to_string(), total_winnings)
        })
        .collect();

    debug!(
        "aggregated {} sessions into {} player stats",
        sessions.len(),
        stats.len()
    );

    stats
}

/// Sort stats for display: highest `total_winnings` first, ties by name.
pub fn leaderboard(mut stats: Vec<PlayerStat>) -> Vec<PlayerStat> {
    stats.sort_by(|a, b| {
        b.total_winnings
            .partial_cmp(&a.total_winnings)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
    });
    stats
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Lifetime totals keyed by player name. The first summary for a name wins.
fn summary_totals(summaries: &[PlayerSummary]) -> HashMap<&str, f64> {
    let mut totals: HashMap<&str, f64> = HashMap::with_capacity(summaries.len());
    for summary in summaries {
        totals
            .entry(summary.player.as_str())
            .or_insert(summary.total_winnings);
    }
    totals
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(day: u32, player: &str, buy_in: f64, profit: f64) -> Session {
        Session {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            player: player.to_string(),
            buy_in,
            profit,
        }
    }

    fn summary(player: &str, total_winnings: f64) -> PlayerSummary {
        PlayerSummary {
            player: player.to_string(),
            total_winnings,
            session_count: 0,
        }
    }

    fn find<'a>(stats: &'a [PlayerStat], player: &str) -> &'a PlayerStat {
        stats.iter().find(|s| s.player == player).unwrap()
    }

    // ── reference examples ────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_two_sessions() {
        let sessions = vec![session(1, "Alice", 20.0, 10.0), session(2, "Alice", 20.0, 5.0)];
        let stats = aggregate(&sessions, &[summary("Alice", 15.0)]);

        assert_eq!(
            stats,
            vec![PlayerStat {
                player: "Alice".to_string(),
                sessions: 2,
                total_profit: 15.0,
                total_buy_in: 40.0,
                highest_single_winning: 10.0,
                total_winnings: 15.0,
                avg_profit: 7.5,
                roi: 37.5,
            }]
        );
    }

    #[test]
    fn test_aggregate_single_session() {
        let stats = aggregate(&[session(1, "Alice", 20.0, 10.0)], &[summary("Alice", 15.0)]);
        let alice = &stats[0];

        assert_eq!(alice.sessions, 1);
        assert_eq!(alice.total_buy_in, 20.0);
        assert!((alice.roi - 50.0).abs() < 1e-9);
    }

    // ── totals ────────────────────────────────────────────────────────────────

    #[test]
    fn test_groups_are_independent() {
        let sessions = vec![
            session(1, "Alice", 20.0, 30.0),
            session(1, "Bob", 20.0, -30.0),
            session(2, "Alice", 50.0, -10.0),
            session(2, "Bob", 50.0, 10.0),
            session(3, "Bob", 20.0, 4.0),
        ];
        let stats = aggregate(&sessions, &[]);

        let alice = find(&stats, "Alice");
        assert_eq!(alice.sessions, 2);
        assert!((alice.total_profit - 20.0).abs() < 1e-9);
        assert!((alice.total_buy_in - 70.0).abs() < 1e-9);
        assert!((alice.avg_profit - 10.0).abs() < 1e-9);

        let bob = find(&stats, "Bob");
        assert_eq!(bob.sessions, 3);
        assert!((bob.total_profit - -16.0).abs() < 1e-9);
        assert!((bob.highest_single_winning - 10.0).abs() < 1e-9);
        assert!((bob.roi - (-16.0 / 90.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_no_rounding_in_accumulation() {
        let sessions = vec![
            session(1, "Alice", 3.0, 0.1),
            session(2, "Alice", 3.0, 0.2),
            session(3, "Alice", 3.0, 0.3),
        ];
        let stats = aggregate(&sessions, &[]);
        assert_eq!(stats[0].total_profit, 0.1 + 0.2 + 0.3);
        assert_eq!(stats[0].avg_profit, (0.1 + 0.2 + 0.3) / 3.0);
    }

    // ── highest_single_winning ───────────────────────────────────────────────

    #[test]
    fn test_highest_single_winning_is_negative_for_losing_player() {
        // Plain max, not max of absolute value: the least-bad loss shows.
        let sessions = vec![
            session(1, "Dave", 20.0, -40.0),
            session(2, "Dave", 20.0, -5.0),
            session(3, "Dave", 20.0, -18.0),
        ];
        let stats = aggregate(&sessions, &[]);
        assert_eq!(stats[0].highest_single_winning, -5.0);
    }

    // ── roi ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_roi_zero_when_nothing_staked() {
        let sessions = vec![session(1, "Eve", 0.0, 35.0), session(2, "Eve", 0.0, -5.0)];
        let stats = aggregate(&sessions, &[]);
        assert_eq!(stats[0].roi, 0.0);
        assert!((stats[0].total_profit - 30.0).abs() < 1e-9);
    }

    // ── total_winnings precedence ────────────────────────────────────────────

    #[test]
    fn test_total_winnings_prefers_summary() {
        let stats = aggregate(&[session(1, "Alice", 20.0, 10.0)], &[summary("Alice", 250.0)]);
        assert_eq!(stats[0].total_winnings, 250.0);
        assert_eq!(stats[0].total_profit, 10.0);
    }

    #[test]
    fn test_total_winnings_keeps_zero_summary() {
        let stats = aggregate(&[session(1, "Alice", 20.0, 10.0)], &[summary("Alice", 0.0)]);
        assert_eq!(stats[0].total_winnings, 0.0);
    }

    #[test]
    fn test_total_winnings_falls_back_to_profit() {
        let stats = aggregate(&[session(1, "Alice", 20.0, 10.0)], &[summary("Bob", 99.0)]);
        assert_eq!(stats[0].total_winnings, 10.0);
    }

    #[test]
    fn test_first_duplicate_summary_wins() {
        let stats = aggregate(
            &[session(1, "Alice", 20.0, 10.0)],
            &[summary("Alice", 1.0), summary("Alice", 2.0)],
        );
        assert_eq!(stats[0].total_winnings, 1.0);
    }

    #[test]
    fn test_summary_only_players_are_not_reported() {
        let stats = aggregate(&[session(1, "Alice", 20.0, 10.0)], &[summary("Zed", 500.0)]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].player, "Alice");
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], &[summary("Alice", 5.0)]).is_empty());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let sessions = vec![
            session(2, "Bob", 20.0, -3.0),
            session(1, "Alice", 20.0, 7.0),
            session(3, "Bob", 40.0, 12.5),
        ];
        let summaries = vec![summary("Bob", 9.5)];
        assert_eq!(aggregate(&sessions, &summaries), aggregate(&sessions, &summaries));
    }

    // ── leaderboard ──────────────────────────────────────────────────────────

    #[test]
    fn test_leaderboard_orders_by_total_winnings() {
        let sessions = vec![
            session(1, "Alice", 20.0, 5.0),
            session(1, "Bob", 20.0, 50.0),
            session(1, "Carol", 20.0, -20.0),
            session(1, "Dave", 20.0, 5.0),
        ];
        let ranked = leaderboard(aggregate(&sessions, &[]));
        let names: Vec<&str> = ranked.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Dave", "Carol"]);
    }
}
