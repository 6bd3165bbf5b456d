//! Moonrise and moonset.
//!
//! The Moon's topocentric elevation is sampled across the site-local date
//! and every sign change of `elevation − target` is refined by bracketed
//! false position. The target puts the upper limb on the horizon:
//! refraction, the semidiameter at the current distance and the optional
//! dip for the site's height. Parallax is part of the topocentric
//! elevation, so the target stays a small negative angle.
//!
//! Source: Montenbruck & Pfleger, _Astronomy on the Personal Computer_
//! §3.8 (sampled search); Meeus, _Astronomical Algorithms_ ch. 15.

use sky_site::{AU_KM, SiteContext, TopocentricPosition, apparent_to_topocentric};
use sky_time::julian::civil_to_j2k_days;
use sky_time::{CalendarDate, DeltaTs, TimeContext};
use tracing::trace;

use crate::error::{LunarCondition, MoonError};
use crate::lunar::{moon_apparent, moon_semidiameter_rad};

/// Mean Earth radius in meters, for the geometric dip.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Largest allowed sampling step, minutes.
const MAX_SCAN_STEP_MINUTES: f64 = 180.0;

/// Maximum false-position iterations per event.
const MAX_ITERATIONS: usize = 60;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoonEventKind {
    Moonrise,
    Moonset,
}

impl MoonEventKind {
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Moonrise)
    }
}

impl std::fmt::Display for MoonEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moonrise => write!(f, "moonrise"),
            Self::Moonset => write!(f, "moonset"),
        }
    }
}

/// Configurable parameters for moonrise/moonset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonRiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Whether to lower the horizon by the geometric dip for the site's
    /// height. Default: true.
    pub altitude_correction: bool,
    /// Sampling step of the elevation scan in minutes. Two crossings closer
    /// than this (a grazing Moon at high latitude) can be missed.
    /// Default: 60.
    pub scan_step_minutes: f64,
}

impl Default for MoonRiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            altitude_correction: true,
            scan_step_minutes: 60.0,
        }
    }
}

impl MoonRiseSetConfig {
    pub fn validate(&self) -> Result<(), MoonError> {
        if !(self.refraction_arcmin.is_finite() && self.refraction_arcmin >= 0.0) {
            return Err(MoonError::InvalidConfig {
                field: "refraction_arcmin",
                value: self.refraction_arcmin,
            });
        }
        let step = self.scan_step_minutes;
        if !(step.is_finite() && step > 0.0 && step <= MAX_SCAN_STEP_MINUTES) {
            return Err(MoonError::InvalidConfig {
                field: "scan_step_minutes",
                value: step,
            });
        }
        Ok(())
    }

    /// Topocentric elevation of the Moon's centre at rise/set, radians.
    pub fn target_altitude_rad(&self, distance_km: f64, height_m: f64) -> f64 {
        let dip = if self.altitude_correction && height_m > 0.0 {
            (2.0 * height_m / EARTH_RADIUS_M).sqrt()
        } else {
            0.0
        };
        -((self.refraction_arcmin / 60.0).to_radians() + moon_semidiameter_rad(distance_km) + dip)
    }
}

/// A moonrise or moonset located in time, with the Moon's position then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonEvent {
    pub kind: MoonEventKind,
    /// UTC days since J2000.0.
    pub j2k_utc_days: f64,
    /// Moon's topocentric position at the event.
    pub position: TopocentricPosition,
}

impl MoonEvent {
    /// Civil time of the event in a zone (hours east of UTC).
    pub fn local_time(&self, tz_hours: f64) -> CalendarDate {
        CalendarDate::from_j2k_days(self.j2k_utc_days, tz_hours)
    }
}

/// Height of the Moon's centre above its rise/set altitude, radians, and
/// the topocentric position it was measured from.
fn clearance(
    t: f64,
    deltas: &DeltaTs,
    site: &SiteContext,
    config: &MoonRiseSetConfig,
) -> Result<(f64, TopocentricPosition), MoonError> {
    let time = TimeContext::from_j2k_utc(t, *deltas)?;
    let apparent = moon_apparent(&time);
    let position = apparent_to_topocentric(&apparent, time.scales(), site);
    let target = config.target_altitude_rad(apparent.distance_au * AU_KM, site.location().height_m);
    let value = position.horizon.geometric_elevation_rad - target;
    if !value.is_finite() {
        return Err(MoonError::NonFinite(value));
    }
    Ok((value, position))
}

/// Refine a bracket `[lo, hi]` with a sign change by false position
/// (Illinois variant).
fn refine(
    kind: MoonEventKind,
    mut lo: (f64, f64),
    mut hi: (f64, f64),
    deltas: &DeltaTs,
    site: &SiteContext,
    config: &MoonRiseSetConfig,
) -> Result<MoonEvent, MoonError> {
    let mut side = 0i8;
    let mut last = f64::NAN;
    for iteration in 0..MAX_ITERATIONS {
        let t = (lo.0 * hi.1 - hi.0 * lo.1) / (hi.1 - lo.1);
        let (value, position) = clearance(t, deltas, site, config)?;
        trace!(
            event = %kind,
            iteration = iteration,
            j2k_utc_days = t,
            clearance_rad = value,
            "lunar event refinement"
        );
        if (t - last).abs() < CONVERGENCE_DAYS || hi.0 - lo.0 < CONVERGENCE_DAYS || value == 0.0 {
            return Ok(MoonEvent {
                kind,
                j2k_utc_days: t,
                position,
            });
        }
        if (value < 0.0) == (lo.1 < 0.0) {
            lo = (t, value);
            if side == -1 {
                hi.1 /= 2.0;
            }
            side = -1;
        } else {
            hi = (t, value);
            if side == 1 {
                lo.1 /= 2.0;
            }
            side = 1;
        }
        last = t;
    }
    Err(MoonError::NoConvergence {
        kind,
        iterations: MAX_ITERATIONS,
        bracket_days: hi.0 - lo.0,
    })
}

/// The first moonrise or moonset on the site-local date of `time`.
///
/// Fails with [`MoonError::NoCrossing`] when the event does not happen that
/// date: the Moon stays up, stays down, or (about once a month at mid
/// latitudes) the event slips past midnight.
pub fn moon_event(
    time: &TimeContext,
    site: &SiteContext,
    kind: MoonEventKind,
    config: &MoonRiseSetConfig,
) -> Result<MoonEvent, MoonError> {
    config.validate()?;
    let deltas = *time.deltas();
    let tz = site.timezone_hours();
    let date = time.calendar(tz);
    let start = civil_to_j2k_days(date.year, date.month, date.day, 0.0) - tz / 24.0;

    let steps = (1440.0 / config.scan_step_minutes).ceil() as usize;
    let step_days = 1.0 / steps as f64;
    let mut prev = (start, clearance(start, &deltas, site, config)?.0);
    let (mut any_above, mut any_below) = (prev.1 >= 0.0, prev.1 < 0.0);

    for i in 1..=steps {
        let t = start + i as f64 * step_days;
        let value = clearance(t, &deltas, site, config)?.0;
        any_above |= value >= 0.0;
        any_below |= value < 0.0;
        let crossed = if kind.is_rising() {
            prev.1 < 0.0 && value >= 0.0
        } else {
            prev.1 >= 0.0 && value < 0.0
        };
        if crossed {
            return refine(kind, prev, (t, value), &deltas, site, config);
        }
        prev = (t, value);
    }

    let condition = match (any_above, any_below) {
        (true, false) => LunarCondition::AlwaysAbove,
        (false, true) => LunarCondition::AlwaysBelow,
        _ => LunarCondition::NotOnDate,
    };
    Err(MoonError::NoCrossing { kind, condition })
}

/// Moonrise and moonset on the site-local date of `time`. A date without
/// one of them yields `None` in its place; invalid input is still an
/// error.
pub fn moon_rise_set(
    time: &TimeContext,
    site: &SiteContext,
    config: &MoonRiseSetConfig,
) -> Result<(Option<MoonEvent>, Option<MoonEvent>), MoonError> {
    let event = |kind| match moon_event(time, site, kind, config) {
        Ok(event) => Ok(Some(event)),
        Err(MoonError::NoCrossing { .. }) => Ok(None),
        Err(e) => Err(e),
    };
    Ok((event(MoonEventKind::Moonrise)?, event(MoonEventKind::Moonset)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_at_sea_level() {
        let c = MoonRiseSetConfig::default();
        let target = c.target_altitude_rad(385_000.0, 0.0).to_degrees() * 60.0;
        // 34′ refraction plus 15.5′ semidiameter.
        assert!((target + 49.52).abs() < 0.02, "{target}′");
    }

    #[test]
    fn dip_lowers_the_target() {
        let c = MoonRiseSetConfig::default();
        let high = c.target_altitude_rad(385_000.0, 1000.0);
        let low = c.target_altitude_rad(385_000.0, 0.0);
        assert!(low - high > 1.0f64.to_radians() && low - high < 1.1f64.to_radians());
        let flat = MoonRiseSetConfig {
            altitude_correction: false,
            ..Default::default()
        };
        assert_eq!(flat.target_altitude_rad(385_000.0, 1000.0), low);
    }

    #[test]
    fn rejects_bad_config() {
        let c = MoonRiseSetConfig {
            scan_step_minutes: 0.0,
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(MoonError::InvalidConfig {
                field: "scan_step_minutes",
                value: 0.0
            })
        );
        let c = MoonRiseSetConfig {
            refraction_arcmin: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(MoonError::InvalidConfig { field: "refraction_arcmin", .. })
        ));
        assert!(MoonRiseSetConfig::default().validate().is_ok());
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(MoonEventKind::Moonrise.to_string(), "moonrise");
        assert!(!MoonEventKind::Moonset.is_rising());
    }
}
