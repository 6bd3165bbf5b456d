//! Types for sunrise/sunset and twilight calculations.

use sky_site::TopocentricPosition;
use sky_time::CalendarDate;

use crate::error::SunError;
use crate::spa::SolarModel;

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Rise/set event types, including twilight variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiseSetEvent {
    /// Upper limb on the horizon, refraction and semidiameter included.
    Sunrise,
    Sunset,
    /// Sun center 6° below the horizon.
    CivilDawn,
    CivilDusk,
    /// Sun center 12° below the horizon.
    NauticalDawn,
    NauticalDusk,
    /// Sun center 18° below the horizon.
    AstronomicalDawn,
    AstronomicalDusk,
}

impl RiseSetEvent {
    /// All events of a day in chronological order.
    pub const ALL: [RiseSetEvent; 8] = [
        Self::AstronomicalDawn,
        Self::NauticalDawn,
        Self::CivilDawn,
        Self::Sunrise,
        Self::Sunset,
        Self::CivilDusk,
        Self::NauticalDusk,
        Self::AstronomicalDusk,
    ];

    /// Twilight depression of the Sun's center in degrees, or `None` for
    /// sunrise/sunset (which depend on [`RiseSetConfig`]).
    pub fn twilight_depression_deg(self) -> Option<f64> {
        match self {
            Self::Sunrise | Self::Sunset => None,
            Self::CivilDawn | Self::CivilDusk => Some(6.0),
            Self::NauticalDawn | Self::NauticalDusk => Some(12.0),
            Self::AstronomicalDawn | Self::AstronomicalDusk => Some(18.0),
        }
    }

    /// Whether this is a rising (morning) event.
    pub fn is_rising(self) -> bool {
        matches!(
            self,
            Self::Sunrise | Self::CivilDawn | Self::NauticalDawn | Self::AstronomicalDawn
        )
    }
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Whether to lower the horizon by the geometric dip for the site's
    /// height: dip ≈ sqrt(2h/R) radians. Default: true.
    pub altitude_correction: bool,
    /// Solar theory to iterate on. Default: [`SolarModel::Approximate`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub model: SolarModel,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            altitude_correction: true,
            model: SolarModel::Approximate,
        }
    }
}

impl RiseSetConfig {
    pub fn validate(&self) -> Result<(), SunError> {
        for (field, value) in [
            ("refraction_arcmin", self.refraction_arcmin),
            ("semidiameter_arcmin", self.semidiameter_arcmin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SunError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    /// Depression of the Sun's center at sunrise/sunset in degrees.
    ///
    /// `h0 = (refraction + semidiameter) / 60 + dip_deg`
    pub fn horizon_depression_deg(&self, height_m: f64) -> f64 {
        let base = (self.refraction_arcmin + self.semidiameter_arcmin) / 60.0;
        if self.altitude_correction && height_m > 0.0 {
            base + (2.0 * height_m / EARTH_RADIUS_M).sqrt().to_degrees()
        } else {
            base
        }
    }

    /// Geocentric altitude of the Sun's center at which `event` occurs,
    /// degrees (negative below the horizon).
    pub fn target_altitude_deg(&self, event: RiseSetEvent, height_m: f64) -> f64 {
        match event.twilight_depression_deg() {
            Some(depression) => -depression,
            None => -self.horizon_depression_deg(height_m),
        }
    }
}

/// A solar event located in time, with the Sun's position at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEvent {
    /// UTC days since J2000.0.
    pub j2k_utc_days: f64,
    /// Sun's topocentric position at the event.
    pub position: TopocentricPosition,
}

impl SolarEvent {
    /// Civil time of the event in a zone (hours east of UTC).
    pub fn local_time(&self, tz_hours: f64) -> CalendarDate {
        CalendarDate::from_j2k_days(self.j2k_utc_days, tz_hours)
    }
}
