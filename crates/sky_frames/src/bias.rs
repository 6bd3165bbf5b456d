//! Frame bias between the ICRS and the dynamical mean equator of J2000.0.
//!
//! Source: IERS Conventions 2003, §5.4.4; SOFA `iauBi00`/`iauBp00`.

use crate::ARCSEC_TO_RAD;
use crate::obliquity::OBLIQUITY_J2000_ARCSEC;
use crate::rotation::{Frame, FrameRotation, rot_x, rot_y, rot_z};

/// ICRS RA of the J2000.0 mean equinox, arcseconds.
pub const BIAS_DRA0_ARCSEC: f64 = -0.0146;
/// Frame bias in longitude, arcseconds.
pub const BIAS_DPSI_ARCSEC: f64 = -0.041_775;
/// Frame bias in obliquity, arcseconds.
pub const BIAS_DEPS_ARCSEC: f64 = -0.006_819_2;

/// Rotation from ICRS to the mean equator and equinox of J2000.0:
/// `B = R1(−δε)·R2(δψ sin ε₀)·R3(dα₀)`.
pub fn frame_bias() -> FrameRotation {
    let eps0 = OBLIQUITY_J2000_ARCSEC * ARCSEC_TO_RAD;
    let m = rot_x(-BIAS_DEPS_ARCSEC * ARCSEC_TO_RAD)
        * rot_y(BIAS_DPSI_ARCSEC * eps0.sin() * ARCSEC_TO_RAD)
        * rot_z(BIAS_DRA0_ARCSEC * ARCSEC_TO_RAD);
    FrameRotation::new(Frame::Icrs, Frame::MeanJ2000, m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spherical::angular_separation;
    use nalgebra::Vector3;

    #[test]
    fn bias_is_tens_of_mas() {
        let b = frame_bias();
        for v in [Vector3::x(), Vector3::y(), Vector3::z()] {
            let sep = angular_separation(&v, &b.apply(&v)) / ARCSEC_TO_RAD;
            assert!(sep < 0.03, "separation {sep}\"");
        }
    }

    #[test]
    fn equinox_offset_matches_dra0() {
        // ICRS x axis seen in the J2000 frame: RA shifts by −dα₀.
        let v = frame_bias().apply(&Vector3::x());
        let ra_as = v.y.atan2(v.x) / ARCSEC_TO_RAD;
        assert!((ra_as - -BIAS_DRA0_ARCSEC).abs() < 1e-4, "ra {ra_as}");
    }

    #[test]
    fn sofa_bias_matrix_element() {
        // SOFA iauBp00 rb[0][1] = −0.7078279744199196e-7
        let b = frame_bias();
        assert!((b.matrix[(0, 1)] - -0.707_827_974_4e-7).abs() < 1e-15);
    }
}
