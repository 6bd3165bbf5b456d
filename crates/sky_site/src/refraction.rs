//! Atmospheric refraction.
//!
//! Above 15° the tangent series `R = A·tan z − B·tan³ z` is used; between
//! −2° and 15° a rational fit in the geometric elevation takes over (the two
//! agree at the join to 0.05″). Below −2° the refraction is set to zero.
//! Both are scaled by `(P/1010)·(283/(273+T))`.

/// Tangent-series coefficients, radians.
const HIGH_A: f64 = 2.8253e-4;
const HIGH_B: f64 = 3.9948e-7;
/// tan(15°): switch-over between the two regimes.
const SWITCH_TAN: f64 = 0.267_949_192_431_122_7;
/// Below this geometric elevation no refraction is applied.
pub const REFRACTION_CUTOFF_RAD: f64 = -2.0 * std::f64::consts::PI / 180.0;

/// Scale factor for a temperature (°C) and pressure (hPa); 1 at 10 °C and
/// 1010 hPa.
pub fn refraction_scale(temperature_c: f64, pressure_hpa: f64) -> f64 {
    (pressure_hpa / 1010.0) * (283.0 / (273.0 + temperature_c))
}

/// Refraction (radians, non-negative) to add to a geometric elevation.
pub fn refraction_rad(geometric_elevation_rad: f64, scale: f64) -> f64 {
    let e = geometric_elevation_rad;
    if !e.is_finite() || e <= REFRACTION_CUTOFF_RAD {
        return 0.0;
    }
    let tan_e = e.tan();
    let r = if tan_e >= SWITCH_TAN {
        let tan_z = 1.0 / tan_e;
        tan_z * (HIGH_A - HIGH_B * tan_z * tan_z)
    } else {
        (8.3323e-3 + e * (3.1786e-2 + 2.0746e-2 * e)) / (1.0 + e * (20.995 + 160.31 * e))
    };
    (r * scale).max(0.0)
}
