//! Geocentric position of the Moon.
//!
//! The main periodic terms of ELP-2000/82 in longitude, latitude and
//! distance, as tabulated by Meeus, _Astronomical Algorithms_ ch. 47 and
//! used by the NREL SAMPA (Reda 2010, NREL/TP-3B0-47681). About 10″ in
//! longitude and 4″ in latitude over the present era. Apparent places take
//! the nutation of the [`TimeContext`]; the theory's longitude already
//! includes the light-time and aberration of the Moon.

use sky_frames::{ecliptic_to_equator, normalize_rad};
use sky_site::site::EARTH_EQUATORIAL_RADIUS_KM;
use sky_site::{
    AU_KM, ApparentPosition, EquatorFrame, SiteContext, TopocentricPosition,
    apparent_to_topocentric,
};
use sky_time::TimeContext;

/// Ratio of the lunar to the terrestrial equatorial radius.
pub const MOON_RADIUS_RATIO: f64 = 0.272_481;

/// Constant part of the Earth–Moon distance series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Multipliers of `[D, M, M′, F]`, then the Σl sine coefficient (1e-6°)
/// and the Σr cosine coefficient (1e-3 km).
type DistanceTerm = ([i8; 4], f64, f64);

/// Multipliers of `[D, M, M′, F]` and the Σb sine coefficient (1e-6°).
type LatitudeTerm = ([i8; 4], f64);

#[rustfmt::skip]
const LONGITUDE_DISTANCE: [DistanceTerm; 60] = [
    ([ 0,  0,  1,  0],   6288774.0,  -20905355.0),
    ([ 2,  0, -1,  0],   1274027.0,   -3699111.0),
    ([ 2,  0,  0,  0],    658314.0,   -2955968.0),
    ([ 0,  0,  2,  0],    213618.0,    -569925.0),
    ([ 0,  1,  0,  0],   -185116.0,      48888.0),
    ([ 0,  0,  0,  2],   -114332.0,      -3149.0),
    ([ 2,  0, -2,  0],     58793.0,     246158.0),
    ([ 2, -1, -1,  0],     57066.0,    -152138.0),
    ([ 2,  0,  1,  0],     53322.0,    -170733.0),
    ([ 2, -1,  0,  0],     45758.0,    -204586.0),
    ([ 0,  1, -1,  0],    -40923.0,    -129620.0),
    ([ 1,  0,  0,  0],    -34720.0,     108743.0),
    ([ 0,  1,  1,  0],    -30383.0,     104755.0),
    ([ 2,  0,  0, -2],     15327.0,      10321.0),
    ([ 0,  0,  1,  2],    -12528.0,          0.0),
    ([ 0,  0,  1, -2],     10980.0,      79661.0),
    ([ 4,  0, -1,  0],     10675.0,     -34782.0),
    ([ 0,  0,  3,  0],     10034.0,     -23210.0),
    ([ 4,  0, -2,  0],      8548.0,     -21636.0),
    ([ 2,  1, -1,  0],     -7888.0,      24208.0),
    ([ 2,  1,  0,  0],     -6766.0,      30824.0),
    ([ 1,  0, -1,  0],     -5163.0,      -8379.0),
    ([ 1,  1,  0,  0],      4987.0,     -16675.0),
    ([ 2, -1,  1,  0],      4036.0,     -12831.0),
    ([ 2,  0,  2,  0],      3994.0,     -10445.0),
    ([ 4,  0,  0,  0],      3861.0,     -11650.0),
    ([ 2,  0, -3,  0],      3665.0,      14403.0),
    ([ 0,  1, -2,  0],     -2689.0,      -7003.0),
    ([ 2,  0, -1,  2],     -2602.0,          0.0),
    ([ 2, -1, -2,  0],      2390.0,      10056.0),
    ([ 1,  0,  1,  0],     -2348.0,       6322.0),
    ([ 2, -2,  0,  0],      2236.0,      -9884.0),
    ([ 0,  1,  2,  0],     -2120.0,       5751.0),
    ([ 0,  2,  0,  0],     -2069.0,          0.0),
    ([ 2, -2, -1,  0],      2048.0,      -4950.0),
    ([ 2,  0,  1, -2],     -1773.0,       4130.0),
    ([ 2,  0,  0,  2],     -1595.0,          0.0),
    ([ 4, -1, -1,  0],      1215.0,      -3958.0),
    ([ 0,  0,  2,  2],     -1110.0,          0.0),
    ([ 3,  0, -1,  0],      -892.0,       3258.0),
    ([ 2,  1,  1,  0],      -810.0,       2616.0),
    ([ 4, -1, -2,  0],       759.0,      -1897.0),
    ([ 0,  2, -1,  0],      -713.0,      -2117.0),
    ([ 2,  2, -1,  0],      -700.0,       2354.0),
    ([ 2,  1, -2,  0],       691.0,          0.0),
    ([ 2, -1,  0, -2],       596.0,          0.0),
    ([ 4,  0,  1,  0],       549.0,      -1423.0),
    ([ 0,  0,  4,  0],       537.0,      -1117.0),
    ([ 4, -1,  0,  0],       520.0,      -1571.0),
    ([ 1,  0, -2,  0],      -487.0,      -1739.0),
    ([ 2,  1,  0, -2],      -399.0,          0.0),
    ([ 0,  0,  2, -2],      -381.0,      -4421.0),
    ([ 1,  1,  1,  0],       351.0,          0.0),
    ([ 3,  0, -2,  0],      -340.0,          0.0),
    ([ 4,  0, -3,  0],       330.0,          0.0),
    ([ 2, -1,  2,  0],       327.0,          0.0),
    ([ 0,  2,  1,  0],      -323.0,       1165.0),
    ([ 1,  1, -1,  0],       299.0,          0.0),
    ([ 2,  0,  3,  0],       294.0,          0.0),
    ([ 2,  0, -1, -2],         0.0,       8752.0),
];

#[rustfmt::skip]
const LATITUDE: [LatitudeTerm; 60] = [
    ([ 0,  0,  0,  1],   5128122.0),
    ([ 0,  0,  1,  1],    280602.0),
    ([ 0,  0,  1, -1],    277693.0),
    ([ 2,  0,  0, -1],    173237.0),
    ([ 2,  0, -1,  1],     55413.0),
    ([ 2,  0, -1, -1],     46271.0),
    ([ 2,  0,  0,  1],     32573.0),
    ([ 0,  0,  2,  1],     17198.0),
    ([ 2,  0,  1, -1],      9266.0),
    ([ 0,  0,  2, -1],      8822.0),
    ([ 2, -1,  0, -1],      8216.0),
    ([ 2,  0, -2, -1],      4324.0),
    ([ 2,  0,  1,  1],      4200.0),
    ([ 2,  1,  0, -1],     -3359.0),
    ([ 2, -1, -1,  1],      2463.0),
    ([ 2, -1,  0,  1],      2211.0),
    ([ 2, -1, -1, -1],      2065.0),
    ([ 0,  1, -1, -1],     -1870.0),
    ([ 4,  0, -1, -1],      1828.0),
    ([ 0,  1,  0,  1],     -1794.0),
    ([ 0,  0,  0,  3],     -1749.0),
    ([ 0,  1, -1,  1],     -1565.0),
    ([ 1,  0,  0,  1],     -1491.0),
    ([ 0,  1,  1,  1],     -1475.0),
    ([ 0,  1,  1, -1],     -1410.0),
    ([ 0,  1,  0, -1],     -1344.0),
    ([ 1,  0,  0, -1],     -1335.0),
    ([ 0,  0,  3,  1],      1107.0),
    ([ 4,  0,  0, -1],      1021.0),
    ([ 4,  0, -1,  1],       833.0),
    ([ 0,  0,  1, -3],       777.0),
    ([ 4,  0, -2,  1],       671.0),
    ([ 2,  0,  0, -3],       607.0),
    ([ 2,  0,  2, -1],       596.0),
    ([ 2, -1,  1, -1],       491.0),
    ([ 2,  0, -2,  1],      -451.0),
    ([ 0,  0,  3, -1],       439.0),
    ([ 2,  0,  2,  1],       422.0),
    ([ 2,  0, -3, -1],       421.0),
    ([ 2,  1, -1,  1],      -366.0),
    ([ 2,  1,  0,  1],      -351.0),
    ([ 4,  0,  0,  1],       331.0),
    ([ 2, -1,  1,  1],       315.0),
    ([ 2, -2,  0, -1],       302.0),
    ([ 0,  0,  1,  3],      -283.0),
    ([ 2,  1,  1, -1],      -229.0),
    ([ 1,  1,  0, -1],       223.0),
    ([ 1,  1,  0,  1],       223.0),
    ([ 0,  1, -2, -1],      -220.0),
    ([ 2,  1, -1, -1],      -220.0),
    ([ 1,  0,  1,  1],      -185.0),
    ([ 2, -1, -2, -1],       181.0),
    ([ 0,  1,  2,  1],      -177.0),
    ([ 4,  0, -2, -1],       176.0),
    ([ 4, -1, -1, -1],       166.0),
    ([ 1,  0,  1, -1],      -164.0),
    ([ 4,  0,  1, -1],       132.0),
    ([ 1,  0, -1, -1],      -119.0),
    ([ 4, -1,  0, -1],       115.0),
    ([ 2, -2,  0,  1],       107.0),
];

/// Fundamental arguments of the lunar theory at one instant, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Mean longitude L′, mean equinox of date.
    pub mean_longitude_rad: f64,
    /// Mean elongation D.
    pub elongation_rad: f64,
    /// Sun's mean anomaly M.
    pub sun_anomaly_rad: f64,
    /// Moon's mean anomaly M′.
    pub moon_anomaly_rad: f64,
    /// Argument of latitude F.
    pub latitude_argument_rad: f64,
    /// Decrease of the Earth's orbital eccentricity, applied once per unit
    /// of M in a term.
    pub eccentricity_factor: f64,
}

/// Evaluate the fundamental arguments at `t` Julian centuries of TT.
pub fn lunar_arguments(t: f64) -> LunarArguments {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    LunarArguments {
        mean_longitude_rad: normalize_rad(lp.to_radians()),
        elongation_rad: normalize_rad(d.to_radians()),
        sun_anomaly_rad: normalize_rad(m.to_radians()),
        moon_anomaly_rad: normalize_rad(mp.to_radians()),
        latitude_argument_rad: normalize_rad(f.to_radians()),
        eccentricity_factor: 1.0 - t * (0.002_516 + 0.000_007_4 * t),
    }
}

/// Geocentric ecliptic coordinates of the Moon, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarCoordinates {
    pub longitude_rad: f64,
    pub latitude_rad: f64,
    /// Centre of the Earth to centre of the Moon, km.
    pub distance_km: f64,
}

impl LunarCoordinates {
    /// Equatorial horizontal parallax, radians.
    pub fn horizontal_parallax_rad(&self) -> f64 {
        (EARTH_EQUATORIAL_RADIUS_KM / self.distance_km).asin()
    }

    /// Geocentric angular semidiameter, radians.
    pub fn semidiameter_rad(&self) -> f64 {
        moon_semidiameter_rad(self.distance_km)
    }
}

/// Geocentric angular semidiameter of the Moon at a distance, radians.
pub fn moon_semidiameter_rad(distance_km: f64) -> f64 {
    (MOON_RADIUS_RATIO * EARTH_EQUATORIAL_RADIUS_KM / distance_km).asin()
}

/// Evaluate the lunar series at `t` Julian centuries of TT.
pub fn lunar_coordinates(t: f64) -> LunarCoordinates {
    let a = lunar_arguments(t);
    let args = [
        a.elongation_rad,
        a.sun_anomaly_rad,
        a.moon_anomaly_rad,
        a.latitude_argument_rad,
    ];
    let argument = |mult: &[i8; 4]| -> f64 {
        mult.iter()
            .zip(args.iter())
            .map(|(&n, &x)| f64::from(n) * x)
            .sum()
    };
    let eccentricity = |mult: &[i8; 4]| a.eccentricity_factor.powi(i32::from(mult[1].abs()));

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for (mult, l, r) in LONGITUDE_DISTANCE.iter().rev() {
        let (s, c) = argument(mult).sin_cos();
        let e = eccentricity(mult);
        sum_l += l * e * s;
        sum_r += r * e * c;
    }
    let mut sum_b: f64 = LATITUDE
        .iter()
        .rev()
        .map(|(mult, b)| b * eccentricity(mult) * argument(mult).sin())
        .sum();

    // Venus, Jupiter and the Earth's flattening.
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let lp = a.mean_longitude_rad;
    let f = a.latitude_argument_rad;
    let mp = a.moon_anomaly_rad;
    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    LunarCoordinates {
        longitude_rad: normalize_rad(lp + (sum_l * 1e-6).to_radians()),
        latitude_rad: (sum_b * 1e-6).to_radians(),
        distance_km: MEAN_DISTANCE_KM + sum_r * 1e-3,
    }
}

/// Apparent geocentric position of the Moon: true equator and equinox of
/// date, distance in AU.
pub fn moon_apparent(time: &TimeContext) -> ApparentPosition {
    let moon = lunar_coordinates(time.tt_centuries());
    let nut = time.nutation();
    ApparentPosition {
        frame: EquatorFrame::Apparent,
        vector: ecliptic_to_equator(
            moon.longitude_rad + nut.dpsi_rad,
            moon.latitude_rad,
            nut.true_obliquity_rad,
        ),
        distance_au: moon.distance_km / AU_KM,
        eq_eq_rad: time.eq_eq_rad(),
        j2k_tt_days: time.j2k_tt_days(),
    }
}

/// Azimuth and elevation of the Moon from a site, diurnal parallax
/// included.
pub fn moon_topocentric(time: &TimeContext, site: &SiteContext) -> TopocentricPosition {
    apparent_to_topocentric(&moon_apparent(time), time.scales(), site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_time::DeltaTs;

    /// 1992 April 12, 0h TD (Meeus example 47.a).
    fn meeus_47a() -> TimeContext {
        TimeContext::from_j2k_utc(-2820.5, DeltaTs::from_delta_t(0.0).unwrap()).unwrap()
    }

    #[test]
    fn arguments_meeus_47a() {
        let a = lunar_arguments(meeus_47a().tt_centuries());
        let deg = |x: f64| x.to_degrees();
        assert!((deg(a.mean_longitude_rad) - 134.290_182).abs() < 1e-6);
        assert!((deg(a.elongation_rad) - 113.842_304).abs() < 1e-6);
        assert!((deg(a.sun_anomaly_rad) - 97.643_514).abs() < 1e-6);
        assert!((deg(a.moon_anomaly_rad) - 5.150_833).abs() < 1e-6);
        assert!((deg(a.latitude_argument_rad) - 219.889_721).abs() < 1e-6);
        assert!((a.eccentricity_factor - 1.000_194).abs() < 1e-6);
    }

    #[test]
    fn coordinates_meeus_47a() {
        let m = lunar_coordinates(meeus_47a().tt_centuries());
        let lon = m.longitude_rad.to_degrees();
        let lat = m.latitude_rad.to_degrees();
        assert!((lon - 133.162_655).abs() < 1e-6, "λ = {lon}");
        assert!((lat - -3.229_126).abs() < 1e-6, "β = {lat}");
        assert!((m.distance_km - 368_409.7).abs() < 0.1, "Δ = {}", m.distance_km);
        let parallax = m.horizontal_parallax_rad().to_degrees();
        assert!((parallax - 0.991_990).abs() < 1e-5, "π = {parallax}");
    }

    #[test]
    fn apparent_moon_meeus_47a() {
        let moon = moon_apparent(&meeus_47a());
        let (ra, dec) = moon.ra_dec();
        assert!((ra.to_degrees() - 134.688_470).abs() < 1e-5, "α = {}", ra.to_degrees());
        assert!((dec.to_degrees() - 13.768_368).abs() < 1e-5, "δ = {}", dec.to_degrees());
        assert!((moon.distance_au * AU_KM - 368_409.7).abs() < 0.1);
        assert_eq!(moon.frame, EquatorFrame::Apparent);
    }

    #[test]
    fn semidiameter_at_mean_distance() {
        // About 15.5′ at 385 000 km.
        let s = moon_semidiameter_rad(385_000.0).to_degrees() * 60.0;
        assert!((s - 15.52).abs() < 0.02, "{s}′");
    }
}
