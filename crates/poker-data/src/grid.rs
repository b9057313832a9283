//! Raw grid parsing.
//!
//! Turns the positional spreadsheet layout into typed [`Session`] and
//! [`PlayerSummary`] records:
//!
//! | row | col 0           | col 1         | col 2  | col 3..            |
//! |-----|-----------------|---------------|--------|--------------------|
//! | 0   | label           | label         | label  | date per column    |
//! | 1   |                 |               |        | buy-in per date    |
//! | 2.. | lifetime total  | session count | player | profit, or blank   |
//!
//! Malformed cells never fail the parse; numbers degrade to `0` and rows or
//! columns that cannot be used are skipped.

use std::sync::OnceLock;

use chrono::NaiveDate;
use poker_core::dates::parse_calendar_date;
use poker_core::models::{ParsedGrid, PlayerSummary, Session};
use regex::Regex;
use tracing::{debug, warn};

const HEADER_ROW: usize = 0;
const BUY_IN_ROW: usize = 1;
const FIRST_PLAYER_ROW: usize = 2;

const WINNINGS_COLUMN: usize = 0;
const COUNT_COLUMN: usize = 1;
const NAME_COLUMN: usize = 2;
const FIRST_DATE_COLUMN: usize = 3;

/// A usable date column: its position, its date and the buy-in shared by
/// everyone who played that day.
#[derive(Debug, Clone, PartialEq)]
struct DateColumn {
    index: usize,
    date: NaiveDate,
    buy_in: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a raw grid into sessions and player summaries.
///
/// Fewer than three rows is a valid "no data" grid. A blank profit cell means
/// the player sat out that date and yields no session.
pub fn parse_grid(rows: &[Vec<String>]) -> ParsedGrid {
    if rows.len() < FIRST_PLAYER_ROW + 1 {
        debug!("grid has {} rows; nothing to parse", rows.len());
        return ParsedGrid::default();
    }

    let columns = date_columns(&rows[HEADER_ROW], &rows[BUY_IN_ROW]);

    let mut parsed = ParsedGrid::default();
    let mut skipped_rows = 0usize;

    for row in &rows[FIRST_PLAYER_ROW..] {
        let name = cell(row, NAME_COLUMN).trim();
        if name.is_empty() {
            skipped_rows += 1;
            continue;
        }

        parsed.player_summaries.push(PlayerSummary {
            player: name.to_string(),
            total_winnings: parse_amount(cell(row, WINNINGS_COLUMN)),
            session_count: parse_count(cell(row, COUNT_COLUMN)),
        });

        for column in &columns {
            let raw = cell(row, column.index);
            if raw.trim().is_empty() {
                continue;
            }
            parsed.sessions.push(Session {
                date: column.date,
                player: name.to_string(),
                buy_in: column.buy_in,
                profit: parse_amount(raw),
            });
        }
    }

    debug!(
        "parsed grid: {} date columns, {} players, {} sessions, {} rows skipped",
        columns.len(),
        parsed.player_summaries.len(),
        parsed.sessions.len(),
        skipped_rows,
    );

    parsed
}

/// Parse a currency-formatted cell such as `"$1,234.00"` or `"-$20"`.
///
/// `$`, `,` and whitespace are stripped first. Blank, unparsable and
/// non-finite values read as `0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = currency_noise().replace_all(raw, "");
    if cleaned.is_empty() {
        return 0.0;
    }
    // `$` may sit between the sign and the digits ("-$20"); it is gone by now.
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!("unparsable amount \"{}\"; using 0", raw);
            0.0
        }
    }
}

/// Parse a session-count cell. Fractions are truncated; anything negative or
/// unparsable reads as `0`.
pub fn parse_count(raw: &str) -> u32 {
    let cleaned = currency_noise().replace_all(raw, "");
    if let Ok(n) = cleaned.parse::<u32>() {
        return n;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u32,
        _ => 0,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Characters removed from numeric cells before parsing.
fn currency_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$,\s]").expect("regex is valid"))
}

/// Cell text at `index`, or `""` when the row is too short.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Buy-ins are stakes and never negative; a negative cell reads as `0`.
fn parse_buy_in(raw: &str, date: NaiveDate) -> f64 {
    let amount = parse_amount(raw);
    if amount < 0.0 {
        warn!("negative buy-in \"{}\" for {}; using 0", raw, date);
        return 0.0;
    }
    amount
}

/// Collect the date columns from the header, keeping their original
/// positions so profit cells stay aligned even around blank headers.
fn date_columns(header: &[String], buy_in_row: &[String]) -> Vec<DateColumn> {
    header
        .iter()
        .enumerate()
        .skip(FIRST_DATE_COLUMN)
        .filter(|(_, label)| !label.trim().is_empty())
        .filter_map(|(index, label)| {
            let date = parse_calendar_date(label)?;
            Some(DateColumn {
                index,
                date,
                buy_in: parse_buy_in(cell(buy_in_row, index), date),
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
