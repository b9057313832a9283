//! Data pipeline for poker stats.
//!
//! Decodes spreadsheet exports into a raw grid, parses the grid into
//! sessions and player summaries, aggregates per-player statistics and
//! derives cumulative profit series for charting.

pub mod aggregator;
pub mod analysis;
pub mod grid;
pub mod reader;
pub mod series;

pub use poker_core as core;
