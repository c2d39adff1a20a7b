//! Engine error type.
//!
//! The allocation engine degrades rather than errors on malformed-but-plausible
//! inputs (empty candidate sets, zero areas, missing bonuses), so this enum
//! covers only genuine boundary failures: unknown scenario/algorithm strings
//! and I/O in callers that load data.  Sub-crates define their own error enums
//! and convert into `CoreError` via `From`, or wrap it as one variant.

use thiserror::Error;

use crate::ParcelId;

/// The top-level error type for `ba-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parcel {0} not found")]
    ParcelNotFound(ParcelId),

    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),

    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ba-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
