//! Error types for lunar computations.

use sky_time::TimeError;
use thiserror::Error;

use crate::riseset::MoonEventKind;

/// Why a moonrise or moonset does not happen on the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarCondition {
    /// The Moon stays above the target altitude all day.
    AlwaysAbove,
    /// The Moon stays below the target altitude all day.
    AlwaysBelow,
    /// The Moon crosses, but this event falls on a neighbouring date.
    NotOnDate,
}

impl std::fmt::Display for LunarCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlwaysAbove => write!(f, "Moon stays above the target altitude"),
            Self::AlwaysBelow => write!(f, "Moon stays below the target altitude"),
            Self::NotOnDate => write!(f, "event falls on another date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MoonError {
    #[error("no {kind}: {condition}")]
    NoCrossing {
        kind: MoonEventKind,
        condition: LunarCondition,
    },
    #[error("{kind} search did not converge after {iterations} iterations (bracket {bracket_days} d)")]
    NoConvergence {
        kind: MoonEventKind,
        iterations: usize,
        bracket_days: f64,
    },
    #[error("moonrise parameter {field} = {value} out of range")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("non-finite value in lunar computation: {0}")]
    NonFinite(f64),
    #[error(transparent)]
    Time(#[from] TimeError),
}
