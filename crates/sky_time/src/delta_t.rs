//! Offsets between UTC, UT1 and TT.
//!
//! A [`DeltaTs`] pins down the two offsets every reduction needs: UT1−UTC
//! (Earth rotation) and TT−UTC (dynamical time). Delta-T = TT − UT1 follows
//! from them.
//!
//! The built-in delta-T model is the Espenak & Meeus (2006) piecewise
//! polynomial fit, published with NASA's Five Millennium Canon of Solar
//! Eclipses. Beyond its tabulated range it falls back to the Morrison &
//! Stephenson long-term parabola.

use crate::error::TimeError;
use crate::julian::{DAYS_PER_JULIAN_YEAR, SECONDS_PER_DAY};

/// TT − TAI, seconds.
pub const TT_MINUS_TAI_S: f64 = 32.184;
/// Largest accepted |UT1 − UTC|; IERS keeps it below 0.9 s.
pub const MAX_DUT1_S: f64 = 0.9;
/// Largest accepted |TT − UTC| or |delta-T|, seconds (about ±5 millennia).
pub const MAX_DELTA_T_S: f64 = 200_000.0;

/// UT1−UTC and TT−UTC, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaTs {
    /// UT1 − UTC.
    pub delta_ut_s: f64,
    /// TT − UTC.
    pub delta_tt_s: f64,
}

impl DeltaTs {
    /// Offsets from the built-in delta-T model, with UTC taken as UT1.
    pub fn builtin(j2k_utc_days: f64) -> Self {
        let year = 2000.0 + j2k_utc_days / DAYS_PER_JULIAN_YEAR;
        Self {
            delta_ut_s: 0.0,
            delta_tt_s: builtin_delta_t_s(year),
        }
    }

    /// Offsets from an explicit delta-T (TT − UT1), with UTC taken as UT1.
    pub fn from_delta_t(delta_t_s: f64) -> Result<Self, TimeError> {
        check_offset("delta_t", delta_t_s, MAX_DELTA_T_S)?;
        Ok(Self {
            delta_ut_s: 0.0,
            delta_tt_s: delta_t_s,
        })
    }

    /// Offsets from the leap-second count TAI − UTC and the published DUT1.
    pub fn from_leap_seconds(tai_minus_utc_s: f64, dut1_s: f64) -> Result<Self, TimeError> {
        check_offset("tai_minus_utc", tai_minus_utc_s, MAX_DELTA_T_S)?;
        check_offset("dut1", dut1_s, MAX_DUT1_S)?;
        Ok(Self {
            delta_ut_s: dut1_s,
            delta_tt_s: tai_minus_utc_s + TT_MINUS_TAI_S,
        })
    }

    /// Offsets with UT1−UTC extrapolated linearly from a bulletin value:
    /// `dut1 = dut1_ref + rate · (mjd − mjd_ref)`.
    pub fn predicted(
        mjd_utc: f64,
        mjd_ref: f64,
        dut1_ref_s: f64,
        dut1_rate_s_per_day: f64,
        tai_minus_utc_s: f64,
    ) -> Result<Self, TimeError> {
        let dut1 = dut1_ref_s + dut1_rate_s_per_day * (mjd_utc - mjd_ref);
        Self::from_leap_seconds(tai_minus_utc_s, dut1)
    }

    /// Delta-T = TT − UT1, seconds.
    pub fn delta_t_s(&self) -> f64 {
        self.delta_tt_s - self.delta_ut_s
    }

    /// UT1 day count for a UTC day count.
    pub fn ut1_days(&self, j2k_utc_days: f64) -> f64 {
        j2k_utc_days + self.delta_ut_s / SECONDS_PER_DAY
    }

    /// TT day count for a UTC day count.
    pub fn tt_days(&self, j2k_utc_days: f64) -> f64 {
        j2k_utc_days + self.delta_tt_s / SECONDS_PER_DAY
    }

    /// UTC day count for a TT day count.
    pub fn utc_days_from_tt(&self, j2k_tt_days: f64) -> f64 {
        j2k_tt_days - self.delta_tt_s / SECONDS_PER_DAY
    }
}

fn check_offset(name: &'static str, value: f64, limit: f64) -> Result<(), TimeError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(TimeError::InvalidOffset { name, value })
    }
}

/// Built-in delta-T (TT − UT1) in seconds for a decimal year.
pub fn builtin_delta_t_s(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if year < -500.0 {
        long_term(year)
    } else if year < 500.0 {
        let u = year / 100.0;
        poly(
            u,
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
        )
    } else if year < 1600.0 {
        let u = (year - 1000.0) / 100.0;
        poly(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if year < 1700.0 {
        let t = year - 1600.0;
        poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if year < 1800.0 {
        let t = year - 1700.0;
        poly(t, &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0])
    } else if year < 1860.0 {
        let t = year - 1800.0;
        poly(
            t,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if year < 1900.0 {
        let t = year - 1860.0;
        poly(
            t,
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233_174.0,
            ],
        )
    } else if year < 1920.0 {
        let t = year - 1900.0;
        poly(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if year < 1941.0 {
        let t = year - 1920.0;
        poly(t, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if year < 1961.0 {
        let t = year - 1950.0;
        poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if year < 1986.0 {
        let t = year - 1975.0;
        poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if year < 2005.0 {
        let t = year - 2000.0;
        poly(
            t,
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
        )
    } else if year < 2050.0 {
        let t = year - 2000.0;
        poly(t, &[62.92, 0.32217, 0.005589])
    } else if year < 2150.0 {
        long_term(year) - 0.5628 * (2150.0 - year)
    } else {
        long_term(year)
    }
}

/// Horner evaluation, coefficients in ascending order.
fn poly(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
