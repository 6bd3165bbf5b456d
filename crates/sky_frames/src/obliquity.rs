//! Obliquity of the ecliptic, IAU 1980.
//!
//! Source: Lieske et al. 1977; Meeus, _Astronomical Algorithms_ eq. 22.2.

use nalgebra::Vector3;

use crate::ARCSEC_TO_RAD;
use crate::rotation::rot_x;
use crate::spherical::unit_vector;

/// Mean obliquity at J2000.0 in arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.448;

/// Mean obliquity of the ecliptic in radians.
///
/// `t` is Julian centuries of TT since J2000.0.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    let eps = OBLIQUITY_J2000_ARCSEC + t * (-46.8150 + t * (-0.00059 + t * 0.001813));
    eps * ARCSEC_TO_RAD
}

/// Equatorial unit vector for ecliptic longitude and latitude referred to
/// an equinox with the given obliquity (mean or true), all radians.
pub fn ecliptic_to_equator(lon_rad: f64, lat_rad: f64, obliquity_rad: f64) -> Vector3<f64> {
    rot_x(-obliquity_rad) * unit_vector(lon_rad, lat_rad)
}
