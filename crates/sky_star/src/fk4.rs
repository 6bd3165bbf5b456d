//! FK4 (B1950) → FK5 (J2000) conversion.
//!
//! Removes the elliptic aberration (E-terms) baked into FK4 mean places and
//! applies the fixed B1950 → J2000 rotation of Aoki et al. (1983), as used
//! by SLALIB `sla_FK425`. The fictitious FK4 proper-motion correction and
//! the equinox drift are not modelled (≈ 0.5″/century).

use nalgebra::{Matrix3, Vector3};
use sky_frames::precession_matrix_between;
use sky_time::{DAYS_PER_JULIAN_CENTURY, besselian_epoch_to_j2k_days};

/// E-terms of aberration vector at B1950, radians.
pub const E_TERMS: [f64; 3] = [-1.62557e-6, -0.31919e-6, -0.13843e-6];

/// B1950 (FK4, E-terms removed) → J2000 (FK5) position rotation.
#[rustfmt::skip]
pub const FK4_TO_FK5: [[f64; 3]; 3] = [
    [0.999_925_678_2, -0.011_182_061_1, -0.004_857_947_7],
    [0.011_182_061_0,  0.999_937_478_4, -0.000_027_176_5],
    [0.004_857_947_9, -0.000_027_247_4,  0.999_988_199_7],
];

fn fk4_to_fk5_matrix() -> Matrix3<f64> {
    let m = FK4_TO_FK5;
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
    )
}

/// Remove the E-terms from an FK4 unit vector: `u − A + (u·A)u`.
pub fn remove_e_terms(u: &Vector3<f64>) -> Vector3<f64> {
    let a = Vector3::from(E_TERMS);
    u - a + u * u.dot(&a)
}

/// Rotation taking FK4 mean places of Besselian equinox `equinox_yr` to
/// B1950.
pub fn fk4_equinox_to_b1950(equinox_yr: f64) -> Matrix3<f64> {
    let t0 = besselian_epoch_to_j2k_days(equinox_yr) / DAYS_PER_JULIAN_CENTURY;
    let t1 = besselian_epoch_to_j2k_days(1950.0) / DAYS_PER_JULIAN_CENTURY;
    precession_matrix_between(t0, t1)
}

/// FK4 position and space motion (rad/yr) at `equinox_yr` → FK5 J2000.
pub fn fk4_to_fk5(
    u: &Vector3<f64>,
    motion: &Vector3<f64>,
    equinox_yr: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let to_b1950 = fk4_equinox_to_b1950(equinox_yr);
    let rotate = fk4_to_fk5_matrix();
    let u1950 = remove_e_terms(&(to_b1950 * u));
    ((rotate * u1950).normalize(), rotate * to_b1950 * motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_frames::{cartesian_to_spherical, unit_vector};

    #[test]
    fn b1950_origin_to_j2000() {
        let (u, _) = fk4_to_fk5(&unit_vector(0.0, 0.0), &Vector3::zeros(), 1950.0);
        let s = cartesian_to_spherical(&u);
        // sla_FK45Z(0, 0, 1950) → 0.640691°, 0.278318°.
        let ra_err = (s.lon_rad.to_degrees() - 0.640_691) * 3600.0;
        let dec_err = (s.lat_rad.to_degrees() - 0.278_318) * 3600.0;
        assert!(ra_err.abs() < 2.0, "ΔRA = {ra_err}″");
        assert!(dec_err.abs() < 2.0, "ΔDec = {dec_err}″");
    }

    #[test]
    fn rotation_is_nearly_orthogonal() {
        let m = fk4_to_fk5_matrix();
        assert!((m.transpose() * m - Matrix3::identity()).amax() < 1e-8);
    }

    #[test]
    fn e_terms_are_a_third_of_an_arcsecond() {
        let u = unit_vector(1.0, 0.2);
        let d = (remove_e_terms(&u) - u).norm() / sky_frames::ARCSEC_TO_RAD;
        assert!(d < 0.35, "{d}″");
    }

    #[test]
    fn b1950_equinox_needs_no_precession() {
        let m = fk4_equinox_to_b1950(1950.0);
        assert!((m - Matrix3::identity()).amax() < 1e-15);
    }
}
