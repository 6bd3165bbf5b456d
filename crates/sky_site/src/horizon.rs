//! Terrestrial → horizon transform.
//!
//! Takes a direction in the terrestrial intermediate frame, applies polar
//! motion and the site rotation, then diurnal parallax (finite distances),
//! optional diurnal aberration and refraction.

use nalgebra::Vector3;
use sky_frames::{normalize_rad, unit_vector};
use sky_time::Timescales;

use crate::position::{ApparentPosition, HorizonPosition, TopocentricPosition};
use crate::refraction::refraction_rad;
use crate::site::SiteContext;

/// Horizon coordinates of a terrestrial-frame direction.
///
/// `distance_au` of 0 (or below) means infinitely distant: no parallax.
pub fn horizon_transform(
    terrestrial: &Vector3<f64>,
    distance_au: f64,
    site: &SiteContext,
) -> HorizonPosition {
    let mut r = site.horizon_matrix() * terrestrial;
    if distance_au > 0.0 {
        r.x += site.rho_sin_au() / distance_au;
        r.z += site.rho_cos_au() / distance_au;
    }
    if site.diurnal_aberration_enabled() {
        r.y += site.diurnal_aberration_rad() * r.norm();
    }

    let azimuth = normalize_rad(r.y.atan2(r.x));
    let geometric = r.z.atan2(r.x.hypot(r.y));
    let refraction = refraction_rad(geometric, site.refraction_scale());
    let elevation = geometric + refraction;

    HorizonPosition {
        azimuth_rad: azimuth,
        elevation_rad: elevation,
        geometric_elevation_rad: geometric,
        refraction_rad: refraction,
        vector: unit_vector(azimuth, elevation),
    }
}

/// Topocentric position of an apparent (or intermediate) geocentric
/// direction at the instant given by `scales`.
pub fn apparent_to_topocentric(
    position: &ApparentPosition,
    scales: &Timescales,
    site: &SiteContext,
) -> TopocentricPosition {
    let terrestrial = position.to_terrestrial(scales.j2k_ut1_days);
    TopocentricPosition {
        horizon: horizon_transform(&terrestrial, position.distance_au, site),
        j2k_utc_days: scales.j2k_utc_days,
        location: *site.location(),
    }
}

impl SiteContext {
    /// Local hour angle (westward, [0, 2π)) and declination of a horizon
    /// vector, radians.
    pub fn hour_angle_declination(&self, horizon: &Vector3<f64>) -> (f64, f64) {
        let v = self.hour_angle_matrix() * horizon;
        (normalize_rad(v.y.atan2(v.x)), v.z.atan2(v.x.hypot(v.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::AU_KM;
    use std::f64::consts::FRAC_PI_2;

    fn airless(lat: f64, lon: f64) -> SiteContext {
        let mut s = SiteContext::new(lat, lon, 0.0).unwrap();
        s.set_temp_press(10.0, 0.0).unwrap();
        s
    }

    #[test]
    fn pole_star_at_latitude_elevation() {
        let s = airless(52.0, 13.0);
        let h = horizon_transform(&Vector3::z(), 0.0, &s);
        assert!((h.elevation_rad.to_degrees() - 52.0).abs() < 1e-10);
        assert!(h.azimuth_rad.abs() < 1e-10 || (h.azimuth_rad - std::f64::consts::TAU).abs() < 1e-10);
    }

    #[test]
    fn zenith_direction() {
        let s = airless(-33.9, 18.4);
        let z = unit_vector(18.4f64.to_radians(), -33.9f64.to_radians());
        let h = horizon_transform(&z, 0.0, &s);
        assert!((h.elevation_rad - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn east_point() {
        let s = airless(40.0, 0.0);
        let h = horizon_transform(&Vector3::y(), 0.0, &s);
        assert!((h.azimuth_rad - FRAC_PI_2).abs() < 1e-12);
        assert!(h.elevation_rad.abs() < 1e-12);
    }

    #[test]
    fn geometric_elevation_matches_vector() {
        let s = SiteContext::new(35.0, 139.7, 40.0).unwrap();
        let v = unit_vector(2.0, 0.3);
        let h = horizon_transform(&v, 0.0, &s);
        let z = (s.horizon_matrix() * v).z;
        assert!((h.geometric_elevation_rad - z.asin()).abs() < 1e-12);
        assert!(h.refraction_rad > 0.0);
        assert!((h.elevation_rad - h.geometric_elevation_rad - h.refraction_rad).abs() < 1e-15);
    }

    #[test]
    fn parallax_lowers_nearby_objects() {
        let s = airless(0.0, 0.0);
        // Object on the horizon due east at 1 AU: shifts by ≈ 8.8″ downward.
        let h = horizon_transform(&Vector3::y(), 1.0, &s);
        let arcsec = -h.elevation_rad.to_degrees() * 3600.0;
        let expected = (6378.14 / AU_KM).to_degrees() * 3600.0;
        assert!((arcsec - expected).abs() < 0.01, "{arcsec}");
    }

    #[test]
    fn polar_motion_shifts_pole() {
        let mut s = airless(90.0, 0.0);
        let before = horizon_transform(&Vector3::z(), 0.0, &s);
        s.set_polar_motion(1e-6, 0.0).unwrap();
        let after = horizon_transform(&Vector3::z(), 0.0, &s);
        let shift = (before.elevation_rad - after.elevation_rad).abs();
        assert!((shift - 1e-6).abs() < 1e-9, "shift {shift}");
    }

    #[test]
    fn hour_angle_of_meridian_equator_point() {
        let s = airless(30.0, 0.0);
        // Equator on the meridian: due south at 60° elevation.
        let v = unit_vector(std::f64::consts::PI, 60f64.to_radians());
        let (ha, dec) = s.hour_angle_declination(&v);
        assert!(ha.abs() < 1e-12 || (ha - std::f64::consts::TAU).abs() < 1e-12);
        assert!(dec.abs() < 1e-12);
        // West point: HA 6h.
        let (ha, _) = s.hour_angle_declination(&unit_vector(1.5 * std::f64::consts::PI, 0.0));
        assert!((ha - FRAC_PI_2).abs() < 1e-12);
    }
}
