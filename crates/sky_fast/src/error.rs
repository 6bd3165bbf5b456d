//! Error types for the fast approximation cache.

use sky_star::CoordError;
use sky_time::TimeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FastCacheError {
    /// Queried or refreshed before `initialize`.
    #[error("fast cache used before initialisation")]
    Uninitialized,
    /// The query falls outside the cached samples and the stale policy
    /// forbids extrapolating that far. Recover with `background_update`.
    #[error("query at TT day {query_tt_days} outside cached window [{window_start}, {window_end}]")]
    Stale {
        query_tt_days: f64,
        window_start: f64,
        window_end: f64,
    },
    #[error("cache configuration {field} = {value} out of range")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("non-finite query epoch {0}")]
    NonFinite(f64),
    #[error(transparent)]
    Coord(#[from] CoordError),
    #[error(transparent)]
    Time(#[from] TimeError),
}

impl FastCacheError {
    /// Errors that a refresh cannot cure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::InvalidConfig { .. })
    }
}
