//! Error types for solar computations.

use sky_time::TimeError;
use thiserror::Error;

/// Why the Sun never reaches a target altitude on the requested day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    /// The Sun stays below the target altitude all day.
    PolarNight,
    /// The Sun stays above the target altitude all day.
    MidnightSun,
}

impl std::fmt::Display for PolarCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PolarNight => write!(f, "Sun stays below the target altitude"),
            Self::MidnightSun => write!(f, "Sun stays above the target altitude"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SunError {
    #[error("no crossing: {0}")]
    NoCrossing(PolarCondition),
    #[error("event search did not converge after {iterations} iterations (last step {last_step_days} d)")]
    NoConvergence { iterations: usize, last_step_days: f64 },
    #[error("rise/set parameter {field} = {value} must be finite and non-negative")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("non-finite value in solar computation: {0}")]
    NonFinite(f64),
    #[error(transparent)]
    Time(#[from] TimeError),
}
