//! Engine error type.
//!
//! Errors only arise while building or configuring a graph.  Per-tick
//! evaluation is total: numerical oddities propagate as `NaN`/`Infinity`
//! rather than as `Err`.  Sub-crates define their own error enums and wrap
//! `TvError` via `From`.

use thiserror::Error;

/// The top-level error type for `tv-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TvError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tv-core`.
pub type TvResult<T> = Result<T, TvError>;
