//! Error types for the core crate
//!
//! Absence of a matching entry is never an error: lookups return `None`,
//! `false` or an empty result. The only failure a series can report is a
//! mutation attempted through an [`ImmutableSeriesView`](crate::view::ImmutableSeriesView).

/// Error type for series operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Cannot {operation}: the parameter series is immutable")]
    Immutable { operation: &'static str },
}

/// Error type for query request decoding
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Invalid value for `{name}`: {value:?} is not a non-negative integer")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid filter JSON: {0}")]
    InvalidFilter(#[from] serde_json::Error),
}
