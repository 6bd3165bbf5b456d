//! Rectangular ↔ spherical conversion for direction vectors.

use std::f64::consts::TAU;

use nalgebra::Vector3;

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in radians, range [0, 2π).
    /// Measured in the x-y plane from +x toward +y.
    pub lon_rad: f64,
    /// Latitude in radians, range [-π/2, π/2].
    pub lat_rad: f64,
    /// Length of the source vector.
    pub distance: f64,
}

/// Reduce an angle to [0, 2π).
pub fn normalize_rad(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Reduce an angle to (−π, π].
pub fn wrap_pi(angle: f64) -> f64 {
    let a = normalize_rad(angle);
    if a > std::f64::consts::PI { a - TAU } else { a }
}

/// Convert a rectangular vector to spherical coordinates.
///
/// The zero vector maps to all-zero coordinates.
pub fn cartesian_to_spherical(v: &Vector3<f64>) -> SphericalCoords {
    let r = v.norm();
    if r == 0.0 {
        return SphericalCoords {
            lon_rad: 0.0,
            lat_rad: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_rad: normalize_rad(v.y.atan2(v.x)),
        lat_rad: v.z.atan2(v.x.hypot(v.y)),
        distance: r,
    }
}

/// Unit vector for a longitude/latitude pair.
pub fn unit_vector(lon_rad: f64, lat_rad: f64) -> Vector3<f64> {
    let (sl, cl) = lon_rad.sin_cos();
    let (sb, cb) = lat_rad.sin_cos();
    Vector3::new(cb * cl, cb * sl, sb)
}

/// Convert spherical coordinates back to a rectangular vector.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> Vector3<f64> {
    unit_vector(s.lon_rad, s.lat_rad) * s.distance
}

/// Angle between two vectors, robust near 0 and π.
pub fn angular_separation(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}
