//! Celestial frame rotations for astrometric reduction.
//!
//! Provides named rotation matrices between the ICRS, the mean and true
//! equators of date and the Earth-fixed frames, together with the IAU 1976
//! precession, IAU 1980 nutation and frame-bias models that generate them.
//! Every function here is a pure function of its epoch argument.

use std::f64::consts::PI;

pub mod bias;
pub mod nutation;
pub mod obliquity;
pub mod pn;
pub mod precession;
pub mod rotation;
pub mod spherical;

/// Arcseconds to radians.
pub const ARCSEC_TO_RAD: f64 = PI / 648_000.0;
/// Milliarcseconds to radians.
pub const MAS_TO_RAD: f64 = ARCSEC_TO_RAD / 1000.0;

pub use bias::frame_bias;
pub use nutation::{NutationTerms, fundamental_arguments, nutation_arcsec, nutation_matrix, nutation_terms};
pub use obliquity::{OBLIQUITY_J2000_ARCSEC, ecliptic_to_equator, mean_obliquity_rad};
pub use pn::PrecessionNutation;
pub use precession::{
    PrecessionAngles, precession_angles, precession_angles_between, precession_matrix,
    precession_matrix_between,
};
pub use rotation::{Frame, FrameRotation, rot_x, rot_y, rot_z};
pub use spherical::{
    SphericalCoords, angular_separation, cartesian_to_spherical, normalize_rad,
    spherical_to_cartesian, unit_vector, wrap_pi,
};
