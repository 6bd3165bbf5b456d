//! High-precision solar position after the NREL Solar Position Algorithm.
//!
//! Heliocentric longitude, latitude and radius of the Earth come from the
//! truncated VSOP87 series of the SPA, good to about 0.0003° between the
//! years −2000 and 6000. The geocentric place then takes the nutation of
//! the [`TimeContext`] and the aberration `−20.4898″ / R`.
//!
//! Source: Reda & Andreas, _Solar Position Algorithm for Solar Radiation
//! Applications_, NREL/TP-560-34302 (2003, rev. 2008), table A4.2.

use std::f64::consts::PI;

use sky_frames::{ARCSEC_TO_RAD, ecliptic_to_equator, normalize_rad};
use sky_site::{ApparentPosition, EquatorFrame, SiteContext, TopocentricPosition, apparent_to_topocentric};
use sky_time::TimeContext;

use crate::solar::{ABERRATION_ARCSEC, sun_apparent};

/// Which solar theory to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolarModel {
    /// Meeus ch. 25 series, about 0.01°.
    #[default]
    Approximate,
    /// Truncated VSOP87 as in the NREL SPA, about 0.0003°.
    Spa,
}

impl SolarModel {
    /// Apparent geocentric Sun from this theory.
    pub fn apparent(self, time: &TimeContext) -> ApparentPosition {
        match self {
            Self::Approximate => sun_apparent(time),
            Self::Spa => sun_apparent_spa(time),
        }
    }

    /// Azimuth and elevation of the Sun from a site.
    pub fn topocentric(self, time: &TimeContext, site: &SiteContext) -> TopocentricPosition {
        apparent_to_topocentric(&self.apparent(time), time.scales(), site)
    }
}

/// Amplitude (1e-8 rad or AU), phase (rad) and frequency (rad per Julian
/// millennium).
type Term = (f64, f64, f64);

#[rustfmt::skip]
const L0: [Term; 64] = [
    (175347046.0, 0.0, 0.0),
    (3341656.0, 4.6692568, 6283.07585),
    (34894.0, 4.6261, 12566.1517),
    (3497.0, 2.7441, 5753.3849),
    (3418.0, 2.8289, 3.5231),
    (3136.0, 3.6277, 77713.7715),
    (2676.0, 4.4181, 7860.4194),
    (2343.0, 6.1352, 3930.2097),
    (1324.0, 0.7425, 11506.7698),
    (1273.0, 2.0371, 529.691),
    (1199.0, 1.1096, 1577.3435),
    (990.0, 5.233, 5884.927),
    (902.0, 2.045, 26.298),
    (857.0, 3.508, 398.149),
    (780.0, 1.179, 5223.694),
    (753.0, 2.533, 5507.553),
    (505.0, 4.583, 18849.228),
    (492.0, 4.205, 775.523),
    (357.0, 2.92, 0.067),
    (317.0, 5.849, 11790.629),
    (284.0, 1.899, 796.298),
    (271.0, 0.315, 10977.079),
    (243.0, 0.345, 5486.778),
    (206.0, 4.806, 2544.314),
    (205.0, 1.869, 5573.143),
    (202.0, 2.458, 6069.777),
    (156.0, 0.833, 213.299),
    (132.0, 3.411, 2942.463),
    (126.0, 1.083, 20.775),
    (115.0, 0.645, 0.98),
    (103.0, 0.636, 4694.003),
    (102.0, 0.976, 15720.839),
    (102.0, 4.267, 7.114),
    (99.0, 6.21, 2146.17),
    (98.0, 0.68, 155.42),
    (86.0, 5.98, 161000.69),
    (85.0, 1.3, 6275.96),
    (85.0, 3.67, 71430.7),
    (80.0, 1.81, 17260.15),
    (79.0, 3.04, 12036.46),
    (75.0, 1.76, 5088.63),
    (74.0, 3.5, 3154.69),
    (74.0, 4.68, 801.82),
    (70.0, 0.83, 9437.76),
    (62.0, 3.98, 8827.39),
    (61.0, 1.82, 7084.9),
    (57.0, 2.78, 6286.6),
    (56.0, 4.39, 14143.5),
    (56.0, 3.47, 6279.55),
    (52.0, 0.19, 12139.55),
    (52.0, 1.33, 1748.02),
    (51.0, 0.28, 5856.48),
    (49.0, 0.49, 1194.45),
    (41.0, 5.37, 8429.24),
    (41.0, 2.4, 19651.05),
    (39.0, 6.17, 10447.39),
    (37.0, 6.04, 10213.29),
    (37.0, 2.57, 1059.38),
    (36.0, 1.71, 2352.87),
    (36.0, 1.78, 6812.77),
    (33.0, 0.59, 17789.85),
    (30.0, 0.44, 83996.85),
    (30.0, 2.74, 1349.87),
    (25.0, 3.16, 4690.48),
];

#[rustfmt::skip]
const L1: [Term; 34] = [
    (628331966747.0, 0.0, 0.0),
    (206059.0, 2.678235, 6283.07585),
    (4303.0, 2.6351, 12566.1517),
    (425.0, 1.59, 3.523),
    (119.0, 5.796, 26.298),
    (109.0, 2.966, 1577.344),
    (93.0, 2.59, 18849.23),
    (72.0, 1.14, 529.69),
    (68.0, 1.87, 398.15),
    (67.0, 4.41, 5507.55),
    (59.0, 2.89, 5223.69),
    (56.0, 2.17, 155.42),
    (45.0, 0.4, 796.3),
    (36.0, 0.47, 775.52),
    (29.0, 2.65, 7.11),
    (21.0, 5.34, 0.98),
    (19.0, 1.85, 5486.78),
    (19.0, 4.97, 213.3),
    (17.0, 2.99, 6275.96),
    (16.0, 0.03, 2544.31),
    (16.0, 1.43, 2146.17),
    (15.0, 1.21, 10977.08),
    (12.0, 2.83, 1748.02),
    (12.0, 3.26, 5088.63),
    (12.0, 5.27, 1194.45),
    (12.0, 2.08, 4694.0),
    (11.0, 0.77, 553.57),
    (10.0, 1.3, 6286.6),
    (10.0, 4.24, 1349.87),
    (9.0, 2.7, 242.73),
    (9.0, 5.64, 951.72),
    (8.0, 5.3, 2352.87),
    (6.0, 2.65, 9437.76),
    (6.0, 4.67, 4690.48),
];

#[rustfmt::skip]
const L2: [Term; 20] = [
    (52919.0, 0.0, 0.0),
    (8720.0, 1.0721, 6283.0758),
    (309.0, 0.867, 12566.152),
    (27.0, 0.05, 3.52),
    (16.0, 5.19, 26.3),
    (16.0, 3.68, 155.42),
    (10.0, 0.76, 18849.23),
    (9.0, 2.06, 77713.77),
    (7.0, 0.83, 775.52),
    (5.0, 4.66, 1577.34),
    (4.0, 1.03, 7.11),
    (4.0, 3.44, 5573.14),
    (3.0, 5.14, 796.3),
    (3.0, 6.05, 5507.55),
    (3.0, 1.19, 242.73),
    (3.0, 6.12, 529.69),
    (3.0, 0.31, 398.15),
    (3.0, 2.28, 553.57),
    (2.0, 4.38, 5223.69),
    (2.0, 3.75, 0.98),
];

#[rustfmt::skip]
const L3: [Term; 7] = [
    (289.0, 5.844, 6283.076),
    (35.0, 0.0, 0.0),
    (17.0, 5.49, 12566.15),
    (3.0, 5.2, 155.42),
    (1.0, 4.72, 3.52),
    (1.0, 5.3, 18849.23),
    (1.0, 5.97, 242.73),
];

#[rustfmt::skip]
const L4: [Term; 3] = [
    (114.0, 3.142, 0.0),
    (8.0, 4.13, 6283.08),
    (1.0, 3.84, 12566.15),
];

#[rustfmt::skip]
const L5: [Term; 1] = [
    (1.0, 3.14, 0.0),
];

#[rustfmt::skip]
const B0: [Term; 5] = [
    (280.0, 3.199, 84334.662),
    (102.0, 5.422, 5507.553),
    (80.0, 3.88, 5223.69),
    (44.0, 3.7, 2352.87),
    (32.0, 4.0, 1577.34),
];

#[rustfmt::skip]
const B1: [Term; 2] = [
    (9.0, 3.9, 5507.55),
    (6.0, 1.73, 5223.69),
];

#[rustfmt::skip]
const R0: [Term; 40] = [
    (100013989.0, 0.0, 0.0),
    (1670700.0, 3.0984635, 6283.07585),
    (13956.0, 3.05525, 12566.1517),
    (3084.0, 5.1985, 77713.7715),
    (1628.0, 1.1739, 5753.3849),
    (1576.0, 2.8469, 7860.4194),
    (925.0, 5.453, 11506.77),
    (542.0, 4.564, 3930.21),
    (472.0, 3.661, 5884.927),
    (346.0, 0.964, 5507.553),
    (329.0, 5.9, 5223.694),
    (307.0, 0.299, 5573.143),
    (243.0, 4.273, 11790.629),
    (212.0, 5.847, 1577.344),
    (186.0, 5.022, 10977.079),
    (175.0, 3.012, 18849.228),
    (110.0, 5.055, 5486.778),
    (98.0, 0.89, 6069.78),
    (86.0, 5.69, 15720.84),
    (86.0, 1.27, 161000.69),
    (65.0, 0.27, 17260.15),
    (63.0, 0.92, 529.69),
    (57.0, 2.01, 83996.85),
    (56.0, 5.24, 71430.7),
    (49.0, 3.25, 2544.31),
    (47.0, 2.58, 775.52),
    (45.0, 5.54, 9437.76),
    (43.0, 6.01, 6275.96),
    (39.0, 5.36, 4694.0),
    (38.0, 2.39, 8827.39),
    (37.0, 0.83, 19651.05),
    (37.0, 4.9, 12139.55),
    (36.0, 1.67, 12036.46),
    (35.0, 1.84, 2942.46),
    (33.0, 0.24, 7084.9),
    (32.0, 0.18, 5088.63),
    (32.0, 1.78, 398.15),
    (28.0, 1.21, 6286.6),
    (28.0, 1.9, 6279.55),
    (26.0, 4.59, 10447.39),
];

#[rustfmt::skip]
const R1: [Term; 10] = [
    (103019.0, 1.10749, 6283.07585),
    (1721.0, 1.0644, 12566.1517),
    (702.0, 3.142, 0.0),
    (32.0, 1.02, 18849.23),
    (31.0, 2.84, 5507.55),
    (25.0, 1.32, 5223.69),
    (18.0, 1.42, 1577.34),
    (10.0, 5.91, 10977.08),
    (9.0, 1.42, 6275.96),
    (9.0, 0.27, 5486.78),
];

#[rustfmt::skip]
const R2: [Term; 6] = [
    (4359.0, 5.7846, 6283.0758),
    (124.0, 5.579, 12566.152),
    (12.0, 3.14, 0.0),
    (9.0, 3.63, 77713.77),
    (6.0, 1.87, 5573.14),
    (3.0, 5.47, 18849.23),
];

#[rustfmt::skip]
const R3: [Term; 2] = [
    (145.0, 4.273, 6283.076),
    (7.0, 3.92, 12566.15),
];

#[rustfmt::skip]
const R4: [Term; 1] = [
    (4.0, 2.56, 6283.08),
];

const LONGITUDE: [&[Term]; 6] = [&L0, &L1, &L2, &L3, &L4, &L5];
const LATITUDE: [&[Term]; 2] = [&B0, &B1];
const RADIUS: [&[Term]; 5] = [&R0, &R1, &R2, &R3, &R4];

/// Σᵢ τⁱ Σ A·cos(B + C·τ), scaled from units of 1e-8.
fn evaluate(series: &[&[Term]], tau: f64) -> f64 {
    let sum = series.iter().rev().fold(0.0, |acc, terms| {
        acc * tau + terms.iter().map(|(a, b, c)| a * (b + c * tau).cos()).sum::<f64>()
    });
    sum * 1e-8
}

/// Heliocentric ecliptic coordinates of the Earth, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricEarth {
    pub longitude_rad: f64,
    pub latitude_rad: f64,
    pub radius_au: f64,
}

/// Evaluate the Earth series at `t` Julian centuries of TT.
pub fn earth_heliocentric_spa(t: f64) -> HeliocentricEarth {
    let tau = t / 10.0;
    HeliocentricEarth {
        longitude_rad: normalize_rad(evaluate(&LONGITUDE, tau)),
        latitude_rad: evaluate(&LATITUDE, tau),
        radius_au: evaluate(&RADIUS, tau),
    }
}

/// Apparent geocentric position of the Sun from the SPA series: true
/// equator and equinox of date, distance in AU.
pub fn sun_apparent_spa(time: &TimeContext) -> ApparentPosition {
    let earth = earth_heliocentric_spa(time.tt_centuries());
    let nut = time.nutation();
    let lambda = earth.longitude_rad + PI + nut.dpsi_rad
        - ABERRATION_ARCSEC * ARCSEC_TO_RAD / earth.radius_au;
    ApparentPosition {
        frame: EquatorFrame::Apparent,
        vector: ecliptic_to_equator(lambda, -earth.latitude_rad, nut.true_obliquity_rad),
        distance_au: earth.radius_au,
        eq_eq_rad: time.eq_eq_rad(),
        j2k_tt_days: time.j2k_tt_days(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_frames::angular_separation;
    use sky_time::{CalendarDate, DeltaTs};

    /// 2003 October 17, 12:30:30 local (UTC−7), ΔT = 67 s: the worked
    /// example of the SPA report.
    fn golden_co() -> TimeContext {
        TimeContext::with_deltas(
            &CalendarDate::new(2003, 10, 17, 12, 30, 30.0),
            -7.0,
            DeltaTs::from_delta_t(67.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn earth_series_spa_example() {
        let e = earth_heliocentric_spa(golden_co().tt_centuries());
        let l = e.longitude_rad.to_degrees();
        let b = e.latitude_rad.to_degrees();
        assert!((l - 24.018_261_691_7).abs() < 1e-8, "L = {l}");
        assert!((b - -0.000_101_121_9).abs() < 1e-9, "B = {b}");
        assert!((e.radius_au - 0.996_542_297_4).abs() < 1e-9, "R = {}", e.radius_au);
    }

    #[test]
    fn apparent_sun_spa_example() {
        let (ra, dec) = sun_apparent_spa(&golden_co()).ra_dec();
        assert!((ra.to_degrees() - 202.227_41).abs() < 2e-5, "α = {}", ra.to_degrees());
        assert!((dec.to_degrees() - -9.314_34).abs() < 2e-5, "δ = {}", dec.to_degrees());
    }

    #[test]
    fn models_agree_to_the_approximate_accuracy() {
        for days in [-30_000.0, -2636.5, 0.0, 1385.81, 9000.25, 30_000.0] {
            let time = TimeContext::from_j2k_utc(days, DeltaTs::builtin(days)).unwrap();
            let a = SolarModel::Approximate.apparent(&time);
            let b = SolarModel::Spa.apparent(&time);
            let sep = angular_separation(&a.vector, &b.vector).to_degrees();
            assert!(sep < 0.012, "{days}: {sep}°");
            assert!((a.distance_au - b.distance_au).abs() < 1e-4);
        }
    }

    #[test]
    fn default_is_approximate() {
        let time = golden_co();
        assert_eq!(SolarModel::default().apparent(&time), sun_apparent(&time));
    }
}
