//! IAU 1976 precession (Lieske et al. 1977).
//!
//! Equatorial precession angles ζ_A, z_A, θ_A between two arbitrary epochs,
//! and the matrix `P = R3(−z)·R2(θ)·R3(−ζ)` that carries mean-equator
//! coordinates from the first epoch to the second.
//!
//! Source: Lieske, Lederle, Fricke & Morando 1977, _A&A_ 58, 1-16;
//! Meeus, _Astronomical Algorithms_ eq. 21.2.

use nalgebra::Matrix3;

use crate::ARCSEC_TO_RAD;
use crate::rotation::{Frame, FrameRotation, rot_y, rot_z};

/// The three equatorial precession angles, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionAngles {
    pub zeta_rad: f64,
    pub z_rad: f64,
    pub theta_rad: f64,
}

/// Precession angles from epoch `t0` to epoch `t1`.
///
/// Both arguments are Julian centuries of TT since J2000.0.
pub fn precession_angles_between(t0: f64, t1: f64) -> PrecessionAngles {
    let big_t = t0;
    let t = t1 - t0;
    let t2 = t * t;
    let t3 = t2 * t;

    let w = 2306.2181 + (1.39656 - 0.000139 * big_t) * big_t;
    let zeta = w * t + (0.30188 - 0.000344 * big_t) * t2 + 0.017998 * t3;
    let z = w * t + (1.09468 + 0.000066 * big_t) * t2 + 0.018203 * t3;
    let theta = (2004.3109 + (-0.85330 - 0.000217 * big_t) * big_t) * t
        - (0.42665 + 0.000217 * big_t) * t2
        - 0.041833 * t3;

    PrecessionAngles {
        zeta_rad: zeta * ARCSEC_TO_RAD,
        z_rad: z * ARCSEC_TO_RAD,
        theta_rad: theta * ARCSEC_TO_RAD,
    }
}

/// Precession angles from J2000.0 to `t` (Julian centuries of TT).
pub fn precession_angles(t: f64) -> PrecessionAngles {
    precession_angles_between(0.0, t)
}

/// Bare precession matrix between two epochs (Julian centuries of TT).
pub fn precession_matrix_between(t0: f64, t1: f64) -> Matrix3<f64> {
    let a = precession_angles_between(t0, t1);
    rot_z(-a.z_rad) * rot_y(a.theta_rad) * rot_z(-a.zeta_rad)
}

/// Precession from the mean equator of J2000.0 to the mean equator of date.
pub fn precession_matrix(t: f64) -> FrameRotation {
    FrameRotation::new(
        Frame::MeanJ2000,
        Frame::MeanOfDate,
        precession_matrix_between(0.0, t),
    )
}
