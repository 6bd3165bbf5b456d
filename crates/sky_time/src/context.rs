//! `TimeContext`: everything time-dependent about one instant.

use chrono::{DateTime, Utc};
use sky_frames::{
    FrameRotation, NutationTerms, PrecessionNutation, nutation_matrix, nutation_terms,
    precession_matrix,
};

use crate::calendar::CalendarDate;
use crate::delta_t::DeltaTs;
use crate::error::TimeError;
use crate::julian::unix_to_j2k_days;
use crate::scales::Timescales;
use crate::sidereal::{earth_rotation_angle_rad, gast_rad, gmst_rad};

/// One instant with its time scales, nutation and sidereal angles.
///
/// Immutable: derive a new context for a new instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeContext {
    scales: Timescales,
    deltas: DeltaTs,
    nutation: NutationTerms,
    gmst_rad: f64,
    gast_rad: f64,
    era_rad: f64,
}

impl TimeContext {
    /// Calendar fields in a zone (hours east of UTC), built-in delta-T.
    pub fn new(date: &CalendarDate, tz_hours: f64) -> Result<Self, TimeError> {
        let utc = date.to_j2k_days(tz_hours)?;
        Self::from_j2k_utc(utc, DeltaTs::builtin(utc))
    }

    /// Calendar fields in a zone with an explicit delta-T (TT − UT1, seconds).
    pub fn with_delta_t(
        date: &CalendarDate,
        tz_hours: f64,
        delta_t_s: f64,
    ) -> Result<Self, TimeError> {
        let utc = date.to_j2k_days(tz_hours)?;
        Self::from_j2k_utc(utc, DeltaTs::from_delta_t(delta_t_s)?)
    }

    /// Calendar fields in a zone with fully specified offsets.
    pub fn with_deltas(
        date: &CalendarDate,
        tz_hours: f64,
        deltas: DeltaTs,
    ) -> Result<Self, TimeError> {
        let utc = date.to_j2k_days(tz_hours)?;
        Self::from_j2k_utc(utc, deltas)
    }

    /// UTC days since J2000.0.
    pub fn from_j2k_utc(j2k_utc_days: f64, deltas: DeltaTs) -> Result<Self, TimeError> {
        if !j2k_utc_days.is_finite() {
            return Err(TimeError::NonFinite(j2k_utc_days));
        }
        let scales = Timescales::new(j2k_utc_days, &deltas);
        let nutation = nutation_terms(scales.tt_centuries());
        let gmst = gmst_rad(scales.j2k_ut1_days);
        Ok(Self {
            scales,
            deltas,
            nutation,
            gmst_rad: gmst,
            gast_rad: gast_rad(gmst, nutation.eq_eq_rad),
            era_rad: earth_rotation_angle_rad(scales.j2k_ut1_days),
        })
    }

    /// Unix seconds (UTC).
    pub fn from_unix(unix_seconds: f64, deltas: DeltaTs) -> Result<Self, TimeError> {
        Self::from_j2k_utc(unix_to_j2k_days(unix_seconds), deltas)
    }

    /// A `chrono` UTC timestamp.
    pub fn from_datetime(dt: &DateTime<Utc>, deltas: DeltaTs) -> Result<Self, TimeError> {
        let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self::from_unix(secs, deltas)
    }

    /// The same session offsets, `days` later.
    pub fn offset_days(&self, days: f64) -> Result<Self, TimeError> {
        Self::from_j2k_utc(self.scales.j2k_utc_days + days, self.deltas)
    }

    /// Calendar fields of this instant in a zone.
    pub fn calendar(&self, tz_hours: f64) -> CalendarDate {
        CalendarDate::from_j2k_days(self.scales.j2k_utc_days, tz_hours)
    }

    pub fn scales(&self) -> &Timescales {
        &self.scales
    }

    pub fn deltas(&self) -> &DeltaTs {
        &self.deltas
    }

    pub fn j2k_utc_days(&self) -> f64 {
        self.scales.j2k_utc_days
    }

    pub fn j2k_ut1_days(&self) -> f64 {
        self.scales.j2k_ut1_days
    }

    pub fn j2k_tt_days(&self) -> f64 {
        self.scales.j2k_tt_days
    }

    /// Julian centuries of TT since J2000.0.
    pub fn tt_centuries(&self) -> f64 {
        self.scales.tt_centuries()
    }

    /// TT − UT1, seconds.
    pub fn delta_t_s(&self) -> f64 {
        self.deltas.delta_t_s()
    }

    pub fn nutation(&self) -> &NutationTerms {
        &self.nutation
    }

    pub fn gmst_rad(&self) -> f64 {
        self.gmst_rad
    }

    pub fn gast_rad(&self) -> f64 {
        self.gast_rad
    }

    pub fn eq_eq_rad(&self) -> f64 {
        self.nutation.eq_eq_rad
    }

    pub fn era_rad(&self) -> f64 {
        self.era_rad
    }

    /// Mean J2000 → mean of date.
    pub fn precession_matrix(&self) -> FrameRotation {
        precession_matrix(self.tt_centuries())
    }

    /// Mean of date → true of date, with the terms it was built from.
    pub fn nutation_matrix(&self) -> (FrameRotation, NutationTerms) {
        (nutation_matrix(&self.nutation), self.nutation)
    }

    /// Precession, nutation and bias for this instant.
    pub fn precession_nutation(&self) -> PrecessionNutation {
        PrecessionNutation::with_nutation(self.tt_centuries(), self.nutation)
    }
}
