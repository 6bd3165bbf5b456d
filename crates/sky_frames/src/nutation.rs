//! IAU 1980 nutation, truncated to the 63 largest lunisolar terms.
//!
//! Computes nutation in longitude (Δψ) and obliquity (Δε), the true
//! obliquity and the equation of the equinoxes. The truncation keeps all
//! terms with amplitude ≥ 0.0003″, good to a few mas.
//!
//! Source: Seidelmann 1982, _Celestial Mechanics_ 27, 79-106; the same
//! term table as Meeus, _Astronomical Algorithms_ table 22.A.

use crate::ARCSEC_TO_RAD;
use crate::obliquity::mean_obliquity_rad;
use crate::rotation::{Frame, FrameRotation, rot_x, rot_z};

/// Lunisolar fundamental arguments in radians: `[D, M, M′, F, Ω]`.
///
/// - `D`  = mean elongation of the Moon from the Sun
/// - `M`  = mean anomaly of the Sun
/// - `M′` = mean anomaly of the Moon
/// - `F`  = Moon's argument of latitude
/// - `Ω`  = longitude of the Moon's ascending node
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let d = 297.85036 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0;
    let m = 357.52772 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0;
    let mp = 134.96298 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0;
    let f = 93.27191 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0;
    let om = 125.04452 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0;
    [
        d.to_radians(),
        m.to_radians(),
        mp.to_radians(),
        f.to_radians(),
        om.to_radians(),
    ]
}

/// One row: multipliers of `[D, M, M′, F, Ω]`, then Δψ sine coefficient
/// and its rate, Δε cosine coefficient and its rate (units of 0.0001″,
/// rates per Julian century).
type Term = ([i8; 5], f64, f64, f64, f64);

#[rustfmt::skip]
const TERMS: [Term; 63] = [
    ([ 0,  0,  0,  0,  1], -171996.0, -174.2, 92025.0,  8.9),
    ([-2,  0,  0,  2,  2],  -13187.0,   -1.6,  5736.0, -3.1),
    ([ 0,  0,  0,  2,  2],   -2274.0,   -0.2,   977.0, -0.5),
    ([ 0,  0,  0,  0,  2],    2062.0,    0.2,  -895.0,  0.5),
    ([ 0,  1,  0,  0,  0],    1426.0,   -3.4,    54.0, -0.1),
    ([ 0,  0,  1,  0,  0],     712.0,    0.1,    -7.0,  0.0),
    ([-2,  1,  0,  2,  2],    -517.0,    1.2,   224.0, -0.6),
    ([ 0,  0,  0,  2,  1],    -386.0,   -0.4,   200.0,  0.0),
    ([ 0,  0,  1,  2,  2],    -301.0,    0.0,   129.0, -0.1),
    ([-2, -1,  0,  2,  2],     217.0,   -0.5,   -95.0,  0.3),
    ([-2,  0,  1,  0,  0],    -158.0,    0.0,     0.0,  0.0),
    ([-2,  0,  0,  2,  1],     129.0,    0.1,   -70.0,  0.0),
    ([ 0,  0, -1,  2,  2],     123.0,    0.0,   -53.0,  0.0),
    ([ 2,  0,  0,  0,  0],      63.0,    0.0,     0.0,  0.0),
    ([ 0,  0,  1,  0,  1],      63.0,    0.1,   -33.0,  0.0),
    ([ 2,  0, -1,  2,  2],     -59.0,    0.0,    26.0,  0.0),
    ([ 0,  0, -1,  0,  1],     -58.0,   -0.1,    32.0,  0.0),
    ([ 0,  0,  1,  2,  1],     -51.0,    0.0,    27.0,  0.0),
    ([-2,  0,  2,  0,  0],      48.0,    0.0,     0.0,  0.0),
    ([ 0,  0, -2,  2,  1],      46.0,    0.0,   -24.0,  0.0),
    ([ 2,  0,  0,  2,  2],     -38.0,    0.0,    16.0,  0.0),
    ([ 0,  0,  2,  2,  2],     -31.0,    0.0,    13.0,  0.0),
    ([ 0,  0,  2,  0,  0],      29.0,    0.0,     0.0,  0.0),
    ([-2,  0,  1,  2,  2],      29.0,    0.0,   -12.0,  0.0),
    ([ 0,  0,  0,  2,  0],      26.0,    0.0,     0.0,  0.0),
    ([-2,  0,  0,  2,  0],     -22.0,    0.0,     0.0,  0.0),
    ([ 0,  0, -1,  2,  1],      21.0,    0.0,   -10.0,  0.0),
    ([ 0,  2,  0,  0,  0],      17.0,   -0.1,     0.0,  0.0),
    ([ 2,  0, -1,  0,  1],      16.0,    0.0,    -8.0,  0.0),
    ([-2,  2,  0,  2,  2],     -16.0,    0.1,     7.0,  0.0),
    ([ 0,  1,  0,  0,  1],     -15.0,    0.0,     9.0,  0.0),
    ([-2,  0,  1,  0,  1],     -13.0,    0.0,     7.0,  0.0),
    ([ 0, -1,  0,  0,  1],     -12.0,    0.0,     6.0,  0.0),
    ([ 0,  0,  2, -2,  0],      11.0,    0.0,     0.0,  0.0),
    ([ 2,  0, -1,  2,  1],     -10.0,    0.0,     5.0,  0.0),
    ([ 2,  0,  1,  2,  2],      -8.0,    0.0,     3.0,  0.0),
    ([ 0,  1,  0,  2,  2],       7.0,    0.0,    -3.0,  0.0),
    ([-2,  1,  1,  0,  0],      -7.0,    0.0,     0.0,  0.0),
    ([ 0, -1,  0,  2,  2],      -7.0,    0.0,     3.0,  0.0),
    ([ 2,  0,  0,  2,  1],      -7.0,    0.0,     3.0,  0.0),
    ([ 2,  0,  1,  0,  0],       6.0,    0.0,     0.0,  0.0),
    ([-2,  0,  2,  2,  2],       6.0,    0.0,    -3.0,  0.0),
    ([-2,  0,  1,  2,  1],       6.0,    0.0,    -3.0,  0.0),
    ([ 2,  0, -2,  0,  1],      -6.0,    0.0,     3.0,  0.0),
    ([ 2,  0,  0,  0,  1],      -6.0,    0.0,     3.0,  0.0),
    ([ 0, -1,  1,  0,  0],       5.0,    0.0,     0.0,  0.0),
    ([-2, -1,  0,  2,  1],      -5.0,    0.0,     3.0,  0.0),
    ([-2,  0,  0,  0,  1],      -5.0,    0.0,     3.0,  0.0),
    ([ 0,  0,  2,  2,  1],      -5.0,    0.0,     3.0,  0.0),
    ([-2,  0,  2,  0,  1],       4.0,    0.0,     0.0,  0.0),
    ([-2,  1,  0,  2,  1],       4.0,    0.0,     0.0,  0.0),
    ([ 0,  0,  1, -2,  0],       4.0,    0.0,     0.0,  0.0),
    ([-1,  0,  1,  0,  0],      -4.0,    0.0,     0.0,  0.0),
    ([-2,  1,  0,  0,  0],      -4.0,    0.0,     0.0,  0.0),
    ([ 1,  0,  0,  0,  0],      -4.0,    0.0,     0.0,  0.0),
    ([ 0,  0,  1,  2,  0],       3.0,    0.0,     0.0,  0.0),
    ([ 0,  0, -2,  2,  2],      -3.0,    0.0,     0.0,  0.0),
    ([-1, -1,  1,  0,  0],      -3.0,    0.0,     0.0,  0.0),
    ([ 0,  1,  1,  0,  0],      -3.0,    0.0,     0.0,  0.0),
    ([ 0, -1,  1,  2,  2],      -3.0,    0.0,     0.0,  0.0),
    ([ 2, -1, -1,  2,  2],      -3.0,    0.0,     0.0,  0.0),
    ([ 0,  0,  3,  2,  2],      -3.0,    0.0,     0.0,  0.0),
    ([ 2, -1,  0,  2,  2],      -3.0,    0.0,     0.0,  0.0),
];

/// Nutation angles and the obliquities they modify, all in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationTerms {
    /// Nutation in longitude Δψ.
    pub dpsi_rad: f64,
    /// Nutation in obliquity Δε.
    pub deps_rad: f64,
    pub mean_obliquity_rad: f64,
    /// Mean obliquity plus Δε.
    pub true_obliquity_rad: f64,
    /// Equation of the equinoxes (GAST − GMST).
    pub eq_eq_rad: f64,
}

/// Δψ and Δε in arcseconds.
pub fn nutation_arcsec(t: f64) -> (f64, f64) {
    let args = fundamental_arguments(t);
    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for (mult, a, b, c, d) in TERMS.iter().rev() {
        let arg: f64 = mult
            .iter()
            .zip(args.iter())
            .map(|(&n, &x)| f64::from(n) * x)
            .sum();
        let (s, co) = arg.sin_cos();
        dpsi += (a + b * t) * s;
        deps += (c + d * t) * co;
    }
    (dpsi * 1e-4, deps * 1e-4)
}

/// Evaluate the nutation series and derived angles.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn nutation_terms(t: f64) -> NutationTerms {
    let (dpsi_as, deps_as) = nutation_arcsec(t);
    let dpsi = dpsi_as * ARCSEC_TO_RAD;
    let deps = deps_as * ARCSEC_TO_RAD;
    let eps0 = mean_obliquity_rad(t);
    let eps = eps0 + deps;

    // IAU 1994 complementary terms of the equation of the equinoxes.
    let om = fundamental_arguments(t)[4];
    let ct = (0.002_64 * om.sin() + 0.000_063 * (2.0 * om).sin()) * ARCSEC_TO_RAD;

    NutationTerms {
        dpsi_rad: dpsi,
        deps_rad: deps,
        mean_obliquity_rad: eps0,
        true_obliquity_rad: eps,
        eq_eq_rad: dpsi * eps.cos() + ct,
    }
}

/// Nutation from the mean equator of date to the true equator of date:
/// `N = R1(−ε_true)·R3(−Δψ)·R1(ε_mean)`.
pub fn nutation_matrix(terms: &NutationTerms) -> FrameRotation {
    FrameRotation::new(
        Frame::MeanOfDate,
        Frame::TrueOfDate,
        rot_x(-terms.true_obliquity_rad) * rot_z(-terms.dpsi_rad) * rot_x(terms.mean_obliquity_rad),
    )
}
