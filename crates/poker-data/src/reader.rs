//! Grid loading from spreadsheet exports.
//!
//! The grid arrives either as a CSV export or as a Sheets-API style JSON
//! document (`{"values": [[...], ...]}`). Fetching it over the network is the
//! caller's business; this module decodes text that is already local.

use std::path::Path;
use std::str::FromStr;

use poker_core::models::Grid;
use poker_core::{Result, StatsError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

// ── SourceFormat ──────────────────────────────────────────────────────────────

/// How an export should be decoded into a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Pick from the file extension, then from the first non-blank character.
    Auto,
    Csv,
    SheetsJson,
}

impl FromStr for SourceFormat {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SourceFormat::Auto),
            "csv" => Ok(SourceFormat::Csv),
            "sheets-json" | "json" => Ok(SourceFormat::SheetsJson),
            other => Err(StatsError::UnsupportedSource(other.to_string())),
        }
    }
}

impl SourceFormat {
    /// Resolve `Auto` for a concrete file and body.
    fn resolve(self, path: Option<&Path>, body: &str) -> SourceFormat {
        if self != SourceFormat::Auto {
            return self;
        }
        let is_json_ext = path
            .and_then(|p| p.extension())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json_ext || body.trim_start().starts_with('{') {
            SourceFormat::SheetsJson
        } else {
            SourceFormat::Csv
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and decode the export at `path`.
///
/// A file that cannot be read is a structural failure and is returned as
/// [`StatsError::FileRead`]; the pipeline never runs for it.
pub fn load_grid(path: &Path, format: SourceFormat) -> Result<Grid> {
    let body = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let grid = decode_grid(&body, format.resolve(Some(path), &body))?;
    debug!("Loaded {} rows from {}", grid.len(), path.display());
    Ok(grid)
}

/// Decode an in-memory export body.
pub fn decode_grid(body: &str, format: SourceFormat) -> Result<Grid> {
    match format.resolve(None, body) {
        SourceFormat::SheetsJson => parse_sheets_values(body),
        _ => parse_csv_grid(body),
    }
}

/// Decode CSV text into a grid.
///
/// There is no header handling (row 0 is data like any other), rows may have
/// different lengths, and every cell is trimmed. Quoted cells may contain
/// commas, e.g. `"$1,234.00"`.
pub fn parse_csv_grid(text: &str) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut grid = Grid::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Decode a Sheets-style `values` document into a grid.
///
/// A missing or empty `values` array is an empty grid. Numbers and booleans
/// are kept as their text form; `null` reads as a blank cell.
pub fn parse_sheets_values(json: &str) -> Result<Grid> {
    #[derive(Deserialize)]
    struct ValueRange {
        #[serde(default)]
        values: Option<Vec<Vec<Value>>>,
    }

    let range: ValueRange = serde_json::from_str(json)?;
    let Some(values) = range.values else {
        warn!("Sheets document has no values; treating as empty grid");
        return Ok(Grid::new());
    };

    Ok(values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
