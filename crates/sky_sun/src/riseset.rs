//! Sunrise/sunset, twilight and solar noon.
//!
//! Iterative hour-angle method: locate the meridian transit near the
//! approximate local noon, take the hour angle at which the Sun's center
//! reaches the target altitude, then refine with the Sun's apparent place
//! recomputed at each estimate until the step drops below 0.1 s.
//!
//! Sources: Meeus, _Astronomical Algorithms_ ch. 15; Montenbruck & Pfleger,
//! _Astronomy on the Personal Computer_ §3.8.

use std::f64::consts::TAU;

use sky_frames::wrap_pi;
use sky_site::SiteContext;
use sky_time::julian::civil_to_j2k_days;
use sky_time::{DeltaTs, TimeContext, local_sidereal_time_rad};
use tracing::trace;

use crate::error::{PolarCondition, SunError};
use crate::riseset_types::{RiseSetConfig, RiseSetEvent, SolarEvent};
use crate::spa::SolarModel;

/// Maximum iterations for each refinement loop.
const MAX_ITERATIONS: usize = 10;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Rate at which the Sun's hour angle advances, rad/day.
const SOLAR_HOUR_ANGLE_RATE: f64 = TAU;

/// Approximate solar transit (UTC days since J2000.0) nearest local clock
/// noon, from the UTC instant of local midnight, the east longitude and the
/// zone offset in hours.
///
/// `noon = midnight + 0.5 − (longitude_deg / 360 − tz_hours / 24)`, with the
/// bracketed offset wrapped into (−0.5, 0.5] so sites whose zone sits a
/// day away from their longitude (across the date line) stay on their date.
pub fn approximate_local_noon(local_midnight_utc: f64, longitude_deg: f64, tz_hours: f64) -> f64 {
    let offset = longitude_deg / 360.0 - tz_hours / 24.0;
    let mut wrapped = offset - offset.round();
    if wrapped <= -0.5 {
        wrapped += 1.0;
    }
    local_midnight_utc + 0.5 - wrapped
}

/// UTC instant of the midnight opening the site-local date of `time`.
fn local_midnight_utc(time: &TimeContext, site: &SiteContext) -> f64 {
    let tz = site.timezone_hours();
    let date = time.calendar(tz);
    civil_to_j2k_days(date.year, date.month, date.day, 0.0) - tz / 24.0
}

/// First transit estimate for the site-local date of `time`.
fn noon_guess(time: &TimeContext, site: &SiteContext) -> f64 {
    approximate_local_noon(
        local_midnight_utc(time, site),
        site.location().longitude_deg,
        site.timezone_hours(),
    )
}

/// Local hour angle in (−π, π] and declination of the Sun's center.
fn sun_hour_angle(time: &TimeContext, site: &SiteContext, model: SolarModel) -> (f64, f64) {
    let (ra, dec) = model.apparent(time).ra_dec();
    let lst = local_sidereal_time_rad(time.gast_rad(), site.astronomical_longitude_rad());
    (wrap_pi(lst - ra), dec)
}

/// Hour angle (≥ 0) at which a body of declination `dec` stands at
/// `altitude` for latitude `lat`, all radians.
pub fn crossing_hour_angle(altitude: f64, lat: f64, dec: f64) -> Result<f64, SunError> {
    let cos_h = (altitude.sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if cos_h.is_nan() {
        return Err(SunError::NonFinite(cos_h));
    }
    if cos_h > 1.0 {
        return Err(SunError::NoCrossing(PolarCondition::PolarNight));
    }
    if cos_h < -1.0 {
        return Err(SunError::NoCrossing(PolarCondition::MidnightSun));
    }
    Ok(cos_h.acos())
}

/// Refine `start` until `step(t)` (days) converges.
fn refine(
    label: &'static str,
    start: f64,
    deltas: &DeltaTs,
    mut step: impl FnMut(&TimeContext) -> Result<f64, SunError>,
) -> Result<f64, SunError> {
    let mut t = start;
    let mut last_step = f64::NAN;
    for iteration in 0..MAX_ITERATIONS {
        let time = TimeContext::from_j2k_utc(t, *deltas)?;
        let dt = step(&time)?;
        trace!(
            stage = label,
            iteration = iteration,
            j2k_utc_days = t,
            step_days = dt,
            "solar event refinement"
        );
        t += dt;
        if !t.is_finite() {
            return Err(SunError::NonFinite(t));
        }
        if dt.abs() < CONVERGENCE_DAYS {
            return Ok(t);
        }
        last_step = dt;
    }
    Err(SunError::NoConvergence {
        iterations: MAX_ITERATIONS,
        last_step_days: last_step,
    })
}

fn transit_near(
    start: f64,
    deltas: &DeltaTs,
    site: &SiteContext,
    model: SolarModel,
) -> Result<f64, SunError> {
    refine("transit", start, deltas, |time| {
        let (ha, _) = sun_hour_angle(time, site, model);
        Ok(-ha / SOLAR_HOUR_ANGLE_RATE)
    })
}

fn event_at(
    t: f64,
    deltas: &DeltaTs,
    site: &SiteContext,
    model: SolarModel,
) -> Result<SolarEvent, SunError> {
    let time = TimeContext::from_j2k_utc(t, *deltas)?;
    Ok(SolarEvent {
        j2k_utc_days: t,
        position: model.topocentric(&time, site),
    })
}

/// The Sun's meridian transit on the site-local date of `time`.
pub fn solar_noon(time: &TimeContext, site: &SiteContext) -> Result<SolarEvent, SunError> {
    solar_noon_with(time, site, SolarModel::default())
}

/// [`solar_noon`] from a chosen solar theory.
pub fn solar_noon_with(
    time: &TimeContext,
    site: &SiteContext,
    model: SolarModel,
) -> Result<SolarEvent, SunError> {
    let deltas = *time.deltas();
    let transit = transit_near(noon_guess(time, site), &deltas, site, model)?;
    event_at(transit, &deltas, site, model)
}

/// One rise/set or twilight event on the site-local date of `time`.
///
/// Fails with [`SunError::NoCrossing`] when the Sun's center never reaches
/// the event's target altitude that day.
pub fn sun_event(
    time: &TimeContext,
    site: &SiteContext,
    event: RiseSetEvent,
    config: &RiseSetConfig,
) -> Result<SolarEvent, SunError> {
    config.validate()?;
    let deltas = *time.deltas();
    let lat = site.astronomical_latitude_rad();
    let altitude = config
        .target_altitude_deg(event, site.location().height_m)
        .to_radians();
    let sign = if event.is_rising() { -1.0 } else { 1.0 };

    let model = config.model;
    let transit = transit_near(noon_guess(time, site), &deltas, site, model)?;
    let (_, dec) = sun_hour_angle(&TimeContext::from_j2k_utc(transit, deltas)?, site, model);
    let start = transit + sign * crossing_hour_angle(altitude, lat, dec)? / SOLAR_HOUR_ANGLE_RATE;

    let t = refine("crossing", start, &deltas, |time| {
        let (ha, dec) = sun_hour_angle(time, site, model);
        let target = sign * crossing_hour_angle(altitude, lat, dec)?;
        Ok(wrap_pi(target - ha) / SOLAR_HOUR_ANGLE_RATE)
    })?;
    event_at(t, &deltas, site, model)
}

/// Sunrise and sunset on the site-local date of `time`.
pub fn sun_rise_set(
    time: &TimeContext,
    site: &SiteContext,
    config: &RiseSetConfig,
) -> Result<(SolarEvent, SolarEvent), SunError> {
    let rise = sun_event(time, site, RiseSetEvent::Sunrise, config)?;
    let set = sun_event(time, site, RiseSetEvent::Sunset, config)?;
    Ok((rise, set))
}

/// Every rise/set and twilight event of the day, in chronological order.
///
/// Each event is computed independently; one that cannot occur carries its
/// own error.
pub fn sun_events_for_day(
    time: &TimeContext,
    site: &SiteContext,
    config: &RiseSetConfig,
) -> Vec<(RiseSetEvent, Result<SolarEvent, SunError>)> {
    RiseSetEvent::ALL
        .iter()
        .map(|&event| (event, sun_event(time, site, event, config)))
        .collect()
}
