//! Greenwich sidereal time and Earth Rotation Angle.
//!
//! All functions take UT1 days since J2000.0.
//!
//! Sources:
//! - GMST: IAU 1982 (Aoki et al. 1982), in the form of Meeus,
//!   _Astronomical Algorithms_ eq. 12.4.
//! - ERA: IERS Conventions 2010, eq. 5.15.

use std::f64::consts::TAU;

use crate::julian::DAYS_PER_JULIAN_CENTURY;

/// Earth Rotation Angle, radians in [0, 2π).
///
/// θ = 2π × (0.7790572732640 + 1.00273781191135448 × Du)
pub fn earth_rotation_angle_rad(j2k_ut1_days: f64) -> f64 {
    let du = j2k_ut1_days;
    // Split the integer day out to keep the fractional turn precise.
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract();
    (TAU * turns.fract()).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time (IAU 1982), radians in [0, 2π).
///
/// GMST = 280.46061837° + 360.98564736629°·D + 0.000387933°·T² − T³/38710000°
pub fn gmst_rad(j2k_ut1_days: f64) -> f64 {
    let d = j2k_ut1_days;
    let t = d / DAYS_PER_JULIAN_CENTURY;
    // 360.98564736629·D split as 360·D + 0.98564736629·D; the first term is
    // whole turns for integer D.
    let deg = 280.460_618_37
        + 360.0 * d.fract()
        + 0.985_647_366_29 * d
        + t * t * (0.000_387_933 - t / 38_710_000.0);
    deg.to_radians().rem_euclid(TAU)
}

/// Greenwich Apparent Sidereal Time from GMST and the equation of the
/// equinoxes, radians in [0, 2π).
pub fn gast_rad(gmst_rad: f64, eq_eq_rad: f64) -> f64 {
    (gmst_rad + eq_eq_rad).rem_euclid(TAU)
}

/// Local sidereal time from a Greenwich sidereal time and east longitude.
pub fn local_sidereal_time_rad(greenwich_rad: f64, longitude_east_rad: f64) -> f64 {
    (greenwich_rad + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms_to_deg(h: f64, m: f64, s: f64) -> f64 {
        (h + m / 60.0 + s / 3600.0) * 15.0
    }

    #[test]
    fn era_at_j2000_noon() {
        let theta_deg = earth_rotation_angle_rad(0.0).to_degrees();
        assert!((theta_deg - 280.460_618_4).abs() < 1e-6, "ERA = {theta_deg}");
    }

    #[test]
    fn gmst_meeus_12a() {
        // 1987 April 10, 0h UT: 13h10m46.3668s
        let d = 2_446_895.5 - 2_451_545.0;
        let gmst = gmst_rad(d).to_degrees();
        let expected = hms_to_deg(13.0, 10.0, 46.3668);
        assert!((gmst - expected).abs() * 240.0 < 1e-3, "GMST = {gmst}");
    }

    #[test]
    fn gmst_meeus_12b() {
        // 1987 April 10, 19h21m00s UT: 8h34m57.0896s
        let d = 2_446_896.306_25 - 2_451_545.0;
        let gmst = gmst_rad(d).to_degrees();
        let expected = hms_to_deg(8.0, 34.0, 57.0896);
        assert!((gmst - expected).abs() * 240.0 < 1e-3, "GMST = {gmst}");
    }

    #[test]
    fn gmst_tracks_era() {
        // The two definitions agree to well under a second of time near J2000.
        for d in [-3650.0, 0.0, 1234.5, 9000.25] {
            let diff = (gmst_rad(d) - earth_rotation_angle_rad(d)).rem_euclid(TAU);
            let precession_part = 4612.16 / 3600.0 * (d / 36525.0);
            let diff_deg = diff.to_degrees();
            let diff_deg = if diff_deg > 180.0 { diff_deg - 360.0 } else { diff_deg };
            assert!((diff_deg - precession_part).abs() < 0.01, "d = {d}: {diff_deg}");
        }
    }

    #[test]
    fn gast_wraps() {
        let g = gast_rad(TAU - 1e-6, 2e-6);
        assert!((g - 1e-6).abs() < 1e-12);
    }

    #[test]
    fn ranges() {
        for d in [-20_000.5, -0.5, 0.0, 8000.75, 40_000.0] {
            assert!((0.0..TAU).contains(&gmst_rad(d)));
            assert!((0.0..TAU).contains(&earth_rotation_angle_rad(d)));
        }
    }
}
