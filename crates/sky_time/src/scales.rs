//! The three day counts a reduction needs for one instant.

use crate::delta_t::DeltaTs;
use crate::julian::DAYS_PER_JULIAN_CENTURY;

/// UTC, UT1 and TT days since J2000.0 for a single instant.
///
/// Cheap to build; the fast cache constructs one per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timescales {
    pub j2k_utc_days: f64,
    pub j2k_ut1_days: f64,
    pub j2k_tt_days: f64,
}

impl Timescales {
    pub fn new(j2k_utc_days: f64, deltas: &DeltaTs) -> Self {
        Self {
            j2k_utc_days,
            j2k_ut1_days: deltas.ut1_days(j2k_utc_days),
            j2k_tt_days: deltas.tt_days(j2k_utc_days),
        }
    }

    /// Julian centuries of TT since J2000.0.
    pub fn tt_centuries(&self) -> f64 {
        self.j2k_tt_days / DAYS_PER_JULIAN_CENTURY
    }
}
