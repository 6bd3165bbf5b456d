//! Analytic solar position.
//!
//! Geometric longitude and radius vector from the low-precision solar theory
//! of Meeus, _Astronomical Algorithms_ ch. 25 (≈ 0.01° over ±2 centuries),
//! combined with the full IAU 1980 nutation of the [`TimeContext`] and the
//! constant of aberration. The Sun's ecliptic latitude (< 1.2″) is neglected.

use nalgebra::Vector3;
use sky_frames::{
    ARCSEC_TO_RAD, ecliptic_to_equator, mean_obliquity_rad, normalize_rad, precession_matrix,
};
use sky_site::{ApparentPosition, EquatorFrame, SiteContext, TopocentricPosition, apparent_to_topocentric};
use sky_time::{DAYS_PER_JULIAN_CENTURY, TimeContext};

/// Constant of annual aberration, arcseconds.
pub const ABERRATION_ARCSEC: f64 = 20.4898;
/// Solar semidiameter at 1 AU, arcseconds.
pub const SEMIDIAMETER_1AU_ARCSEC: f64 = 959.63;

/// Half-width of the central difference used for the Earth's velocity, days.
const VELOCITY_STEP_DAYS: f64 = 0.25;

/// Elements of the solar theory at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoordinates {
    /// Geometric mean longitude L₀, mean equinox of date.
    pub mean_longitude_rad: f64,
    /// Mean anomaly M.
    pub mean_anomaly_rad: f64,
    /// Eccentricity of the Earth's orbit.
    pub eccentricity: f64,
    /// Equation of the center C.
    pub equation_of_center_rad: f64,
    /// True geometric longitude ☉ = L₀ + C, mean equinox of date.
    pub true_longitude_rad: f64,
    /// True anomaly ν = M + C.
    pub true_anomaly_rad: f64,
    /// Sun–Earth distance, AU.
    pub radius_au: f64,
}

/// Evaluate the solar theory at `t` Julian centuries of TT.
pub fn solar_coordinates(t: f64) -> SolarCoordinates {
    let l0 = 280.466_46 + t * (36_000.769_83 + 0.000_303_2 * t);
    let m = 357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t);
    let e = 0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t);
    let m_rad = m.to_radians();
    let c = (1.914_602 - t * (0.004_817 + 0.000_014 * t)) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();
    let nu = (m + c).to_radians();
    SolarCoordinates {
        mean_longitude_rad: normalize_rad(l0.to_radians()),
        mean_anomaly_rad: normalize_rad(m_rad),
        eccentricity: e,
        equation_of_center_rad: c.to_radians(),
        true_longitude_rad: normalize_rad((l0 + c).to_radians()),
        true_anomaly_rad: normalize_rad(nu),
        radius_au: 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos()),
    }
}

/// Apparent geocentric position of the Sun: true equator and equinox of
/// date, distance in AU.
pub fn sun_apparent(time: &TimeContext) -> ApparentPosition {
    let s = solar_coordinates(time.tt_centuries());
    let nut = time.nutation();
    let lambda =
        s.true_longitude_rad + nut.dpsi_rad - ABERRATION_ARCSEC * ARCSEC_TO_RAD / s.radius_au;
    ApparentPosition {
        frame: EquatorFrame::Apparent,
        vector: ecliptic_to_equator(lambda, 0.0, nut.true_obliquity_rad),
        distance_au: s.radius_au,
        eq_eq_rad: time.eq_eq_rad(),
        j2k_tt_days: time.j2k_tt_days(),
    }
}

/// Azimuth and elevation of the Sun from a site.
pub fn sun_topocentric(time: &TimeContext, site: &SiteContext) -> TopocentricPosition {
    apparent_to_topocentric(&sun_apparent(time), time.scales(), site)
}

/// Angular semidiameter of the Sun at a distance, radians.
pub fn solar_semidiameter_rad(distance_au: f64) -> f64 {
    SEMIDIAMETER_1AU_ARCSEC * ARCSEC_TO_RAD / distance_au
}

/// Heliocentric position and velocity of the Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthState {
    /// Mean equator and equinox of J2000, AU.
    pub position_au: Vector3<f64>,
    /// Mean equator and equinox of J2000, AU/day.
    pub velocity_au_d: Vector3<f64>,
}

fn earth_position_j2000(t: f64) -> Vector3<f64> {
    let s = solar_coordinates(t);
    let of_date = ecliptic_to_equator(s.true_longitude_rad + std::f64::consts::PI, 0.0, mean_obliquity_rad(t))
        * s.radius_au;
    precession_matrix(t).inverse().apply(&of_date)
}

/// Earth's heliocentric state at `t` Julian centuries of TT.
///
/// The velocity is a central difference of the position over ±6 h.
pub fn earth_heliocentric(t: f64) -> EarthState {
    let h = VELOCITY_STEP_DAYS / DAYS_PER_JULIAN_CENTURY;
    let ahead = earth_position_j2000(t + h);
    let behind = earth_position_j2000(t - h);
    EarthState {
        position_au: earth_position_j2000(t),
        velocity_au_d: (ahead - behind) / (2.0 * VELOCITY_STEP_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_frames::angular_separation;
    use sky_time::DeltaTs;

    /// 1992 October 13.0 TD (Meeus example 25.a).
    fn meeus_25a() -> TimeContext {
        TimeContext::from_j2k_utc(-2636.5, DeltaTs::from_delta_t(0.0).unwrap()).unwrap()
    }

    #[test]
    fn theory_elements_meeus_25a() {
        let t = meeus_25a().tt_centuries();
        assert!((t - -0.072_183_436).abs() < 1e-9, "T = {t}");
        let s = solar_coordinates(t);
        assert!((s.true_longitude_rad.to_degrees() - 199.909_88).abs() < 1e-4);
        assert!((s.mean_anomaly_rad.to_degrees() - 278.993_97).abs() < 1e-4);
        assert!((s.eccentricity - 0.016_711_668).abs() < 1e-9);
        assert!((s.equation_of_center_rad.to_degrees() - -1.897_32).abs() < 1e-4);
        assert!((s.radius_au - 0.997_66).abs() < 2e-5, "R = {}", s.radius_au);
    }

    #[test]
    fn apparent_sun_meeus_25a() {
        let sun = sun_apparent(&meeus_25a());
        let (ra, dec) = sun.ra_dec();
        assert!((ra.to_degrees() - 198.380_83).abs() < 0.01, "α = {}", ra.to_degrees());
        assert!((dec.to_degrees() - -7.785_07).abs() < 0.01, "δ = {}", dec.to_degrees());
        assert_eq!(sun.frame, EquatorFrame::Apparent);
        assert!((sun.vector.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn earth_is_opposite_the_sun() {
        let time = meeus_25a();
        let earth = earth_heliocentric(time.tt_centuries());
        let sun = sun_apparent(&time);
        // Undo nutation and precession: what remains is annual aberration.
        let sun_j2000 = time.precession_nutation().np.inverse().apply(&sun.vector);
        let sep = angular_separation(&-earth.position_au, &sun_j2000) / ARCSEC_TO_RAD;
        let expected = ABERRATION_ARCSEC / sun.distance_au;
        assert!((sep - expected).abs() < 0.05, "sep = {sep}″");
        assert!((earth.position_au.norm() - sun.distance_au).abs() < 1e-9);
    }

    #[test]
    fn earth_velocity_is_orbital() {
        let earth = earth_heliocentric(0.24);
        let speed = earth.velocity_au_d.norm();
        assert!((0.0165..0.0176).contains(&speed), "v = {speed} AU/d");
        let cos = earth.position_au.dot(&earth.velocity_au_d)
            / (earth.position_au.norm() * speed);
        assert!(cos.abs() < 0.02, "radial fraction {cos}");
    }

    #[test]
    fn semidiameter_near_16_arcmin() {
        let sd = solar_semidiameter_rad(1.0).to_degrees() * 60.0;
        assert!((sd - 16.0).abs() < 0.05, "{sd}′");
        assert!(solar_semidiameter_rad(0.983) > solar_semidiameter_rad(1.017));
    }
}
