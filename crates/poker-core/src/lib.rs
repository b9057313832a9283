//! Shared types for the poker stats pipeline.
//!
//! Session and player records, the error type, calendar-date helpers,
//! display formatting and CLI settings.

pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{Result, StatsError};
