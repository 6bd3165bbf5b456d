//! Catalog validation errors.

use thiserror::Error;

/// Why a catalog entry cannot be reduced.
///
/// Closed: every variant names one field and, where there is one, the
/// offending value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("catalog entry has no name")]
    MissingIdentity,
    #[error("right ascension missing")]
    MissingRa,
    #[error("right ascension {0} is not finite")]
    InvalidRa(f64),
    #[error("right ascension {0} rad outside [0, 2π)")]
    RaOutOfRange(f64),
    #[error("declination missing")]
    MissingDec,
    #[error("declination {0} is not finite")]
    InvalidDec(f64),
    #[error("declination {0} rad outside [-π/2, π/2]")]
    DecOutOfRange(f64),
    #[error("proper motion in right ascension missing")]
    MissingPmRa,
    #[error("proper motion in declination missing")]
    MissingPmDec,
    #[error("proper motion in right ascension {0} mas/yr is not finite")]
    InvalidPmRa(f64),
    #[error("proper motion in declination {0} mas/yr is not finite")]
    InvalidPmDec(f64),
    #[error("parallax {0} mas must be finite and non-negative")]
    InvalidParallax(f64),
    #[error("parallax {parallax_mas} mas given without proper motion")]
    ParallaxNeedsProperMotion { parallax_mas: f64 },
    #[error("radial velocity {0} km/s is not finite")]
    InvalidRadialVelocity(f64),
    #[error("radial velocity {radial_velocity_km_s} km/s given without proper motion")]
    RadialVelocityNeedsProperMotion { radial_velocity_km_s: f64 },
    #[error("proper motion given without an epoch")]
    MissingEpoch,
    #[error("epoch or equinox {0} is not finite")]
    InvalidEpoch(f64),
    #[error("reduction produced a non-finite result")]
    NonFinite,
}
