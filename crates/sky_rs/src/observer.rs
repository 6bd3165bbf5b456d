//! An observing session: one site plus the time offsets to use with it.

use std::time::{SystemTime, UNIX_EPOCH};

use sky_fast::{
    ApparentSource, FastCache, FastCacheConfig, MoonSource, SunSource, TrackedPosition,
};
use sky_moon::{MoonEvent, MoonRiseSetConfig, moon_rise_set, moon_topocentric};
use sky_site::{SiteContext, TopocentricPosition};
use sky_star::{CatalogPosition, CatalogRecord, ReductionConfig, catalog_to_topocentric};
use sky_sun::{RiseSetConfig, SolarEvent, SolarModel, sun_rise_set, sun_topocentric};
use sky_time::{CalendarDate, DeltaTs, TimeContext};

use crate::error::SkyError;

#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    site: SiteContext,
    /// `None` selects the built-in delta-T model per instant.
    deltas: Option<DeltaTs>,
}

impl Observer {
    pub fn new(site: SiteContext) -> Self {
        Self { site, deltas: None }
    }

    /// Fixed UT1/TT offsets, e.g. from a current IERS bulletin.
    pub fn with_deltas(site: SiteContext, deltas: DeltaTs) -> Self {
        Self {
            site,
            deltas: Some(deltas),
        }
    }

    pub fn site(&self) -> &SiteContext {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut SiteContext {
        &mut self.site
    }

    pub fn deltas(&self) -> Option<&DeltaTs> {
        self.deltas.as_ref()
    }

    /// Time context for UTC days since J2000.0.
    pub fn time_at(&self, j2k_utc_days: f64) -> Result<TimeContext, SkyError> {
        let deltas = self
            .deltas
            .unwrap_or_else(|| DeltaTs::builtin(j2k_utc_days));
        Ok(TimeContext::from_j2k_utc(j2k_utc_days, deltas)?)
    }

    /// Time context for calendar fields in the site's timezone.
    pub fn time_at_local(&self, date: &CalendarDate) -> Result<TimeContext, SkyError> {
        let utc = date.to_j2k_days(self.site.timezone_hours())?;
        self.time_at(utc)
    }

    /// Time context for the system clock.
    pub fn now(&self) -> Result<TimeContext, SkyError> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| SkyError::Clock)?;
        self.time_at(sky_time::unix_to_j2k_days(since_epoch.as_secs_f64()))
    }

    pub fn star(
        &self,
        star: &CatalogPosition,
        time: &TimeContext,
    ) -> Result<TopocentricPosition, SkyError> {
        Ok(catalog_to_topocentric(star, time, &self.site)?)
    }

    /// Validate a raw catalog record and reduce it.
    pub fn star_record(
        &self,
        record: &CatalogRecord,
        config: &ReductionConfig,
        time: &TimeContext,
    ) -> Result<TopocentricPosition, SkyError> {
        let star = record.to_position(config)?;
        self.star(&star, time)
    }

    pub fn sun(&self, time: &TimeContext) -> TopocentricPosition {
        sun_topocentric(time, &self.site)
    }

    pub fn sun_with(&self, model: SolarModel, time: &TimeContext) -> TopocentricPosition {
        model.topocentric(time, &self.site)
    }

    pub fn moon(&self, time: &TimeContext) -> TopocentricPosition {
        moon_topocentric(time, &self.site)
    }

    /// Moonrise and moonset on the local date of `time`; either may be
    /// absent.
    pub fn moon_rise_set(
        &self,
        time: &TimeContext,
        config: &MoonRiseSetConfig,
    ) -> Result<(Option<MoonEvent>, Option<MoonEvent>), SkyError> {
        Ok(moon_rise_set(time, &self.site, config)?)
    }

    /// Sunrise and sunset on the local date of `time`.
    pub fn sun_rise_set(
        &self,
        time: &TimeContext,
        config: &RiseSetConfig,
    ) -> Result<(SolarEvent, SolarEvent), SkyError> {
        Ok(sun_rise_set(time, &self.site, config)?)
    }

    /// A fast cache for any source, sampled from `time`.
    pub fn tracker<S: ApparentSource>(
        &self,
        source: S,
        time: &TimeContext,
        config: FastCacheConfig,
    ) -> Result<FastCache<S>, SkyError> {
        Ok(FastCache::init(source, time, config)?)
    }

    pub fn sun_tracker(
        &self,
        time: &TimeContext,
        config: FastCacheConfig,
    ) -> Result<FastCache<SunSource>, SkyError> {
        self.tracker(SunSource, time, config)
    }

    pub fn moon_tracker(
        &self,
        time: &TimeContext,
        config: FastCacheConfig,
    ) -> Result<FastCache<MoonSource>, SkyError> {
        self.tracker(MoonSource, time, config)
    }

    /// Cached position from this observer's site, refreshing first when the
    /// instant has left the current sample pair.
    pub fn track<S: ApparentSource>(
        &self,
        cache: &mut FastCache<S>,
        j2k_utc_days: f64,
    ) -> Result<TrackedPosition, SkyError> {
        if cache.needs_refresh(j2k_utc_days) {
            cache.background_update(j2k_utc_days)?;
        }
        Ok(cache.get_approx(j2k_utc_days, &self.site)?)
    }
}
