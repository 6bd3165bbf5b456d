//! Three-sample interpolation cache.
//!
//! Exact positions are kept at three instants one window apart (`last`,
//! `next`, `one_after`). Queries between `last` and `one_after` are answered
//! by normalised linear interpolation of the direction and linear
//! interpolation of distance and equation of the equinoxes; the site
//! transform is then run at the query instant. `background_update` slides
//! the samples forward (one exact evaluation) or re-anchors them (three).

use nalgebra::Vector3;
use sky_frames::angular_separation;
use sky_site::{
    ApparentPosition, EquatorFrame, SiteContext, TopocentricPosition, apparent_to_topocentric,
};
use sky_time::{DeltaTs, TimeContext, Timescales};
use tracing::debug;

use crate::config::{FastCacheConfig, StalePolicy};
use crate::error::FastCacheError;
use crate::source::ApparentSource;

/// Safety factor on the interpolation error model.
const ERROR_SAFETY: f64 = 1.5;
/// Floor added to every error bound, radians (about 2 mas).
const ERROR_FLOOR_RAD: f64 = 1e-8;

/// One exact evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheSample {
    pub j2k_utc_days: f64,
    pub j2k_tt_days: f64,
    pub vector: Vector3<f64>,
    pub distance_au: f64,
    pub eq_eq_rad: f64,
    pub frame: EquatorFrame,
}

impl CacheSample {
    fn new(j2k_utc_days: f64, position: &ApparentPosition) -> Self {
        Self {
            j2k_utc_days,
            j2k_tt_days: position.j2k_tt_days,
            vector: position.vector,
            distance_au: position.distance_au,
            eq_eq_rad: position.eq_eq_rad,
            frame: position.frame,
        }
    }
}

/// Three consecutive samples and the offsets they were computed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheWindow {
    pub deltas: DeltaTs,
    /// Sample spacing, days.
    pub interval_days: f64,
    pub last: CacheSample,
    pub next: CacheSample,
    pub one_after: CacheSample,
    /// Second difference of the direction across the three samples, with
    /// the radial part removed, radians.
    pub curvature_rad: f64,
}

impl CacheWindow {
    fn new(
        deltas: DeltaTs,
        interval_days: f64,
        last: CacheSample,
        next: CacheSample,
        one_after: CacheSample,
    ) -> Self {
        let d2 = last.vector - next.vector * 2.0 + one_after.vector;
        // Uniform great-circle motion has a purely radial second difference.
        let tangential = d2 - next.vector * d2.dot(&next.vector);
        Self {
            deltas,
            interval_days,
            last,
            next,
            one_after,
            curvature_rad: tangential.norm(),
        }
    }

    /// TT of the first sample.
    pub fn start_tt(&self) -> f64 {
        self.last.j2k_tt_days
    }

    /// TT of the last sample.
    pub fn end_tt(&self) -> f64 {
        self.one_after.j2k_tt_days
    }

    fn in_current(&self, tt: f64) -> bool {
        tt >= self.last.j2k_tt_days && tt <= self.next.j2k_tt_days
    }

    fn in_lookahead(&self, tt: f64) -> bool {
        tt > self.next.j2k_tt_days && tt <= self.one_after.j2k_tt_days
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FastCacheState {
    Uninitialized,
    Ready(CacheWindow),
}

/// How a query was answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheStatus {
    /// Interpolated between exact samples.
    Valid,
    /// Extrapolated past the samples by `windows_beyond` window lengths.
    Extrapolated { windows_beyond: f64 },
}

/// Coverage of an instant by the current samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Uninitialized,
    Valid,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPosition {
    pub topocentric: TopocentricPosition,
    /// The interpolated geocentric position.
    pub apparent: ApparentPosition,
    pub status: CacheStatus,
    /// Upper estimate of the angular error of `apparent`, radians.
    pub error_bound_rad: f64,
}

/// Result of [`FastCache::background_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Already covered; nothing computed.
    Unchanged,
    /// Slid forward by one window.
    Advanced,
    /// Re-sampled from the requested instant.
    Reanchored,
}

/// Fast approximate positions of one source.
///
/// `get_approx` never evaluates the source; only `initialize` and
/// `background_update` do, so a tracking loop can keep the expensive work
/// off its hot path.
#[derive(Debug, Clone)]
pub struct FastCache<S> {
    source: S,
    config: FastCacheConfig,
    state: FastCacheState,
}

impl<S: ApparentSource> FastCache<S> {
    /// An uninitialised cache.
    pub fn new(source: S, config: FastCacheConfig) -> Result<Self, FastCacheError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            state: FastCacheState::Uninitialized,
        })
    }

    /// A cache sampled from `time` onward.
    pub fn init(
        source: S,
        time: &TimeContext,
        config: FastCacheConfig,
    ) -> Result<Self, FastCacheError> {
        let mut cache = Self::new(source, config)?;
        cache.initialize(time)?;
        Ok(cache)
    }

    /// (Re)sample from `time` onward, adopting its UT1/TT offsets.
    pub fn initialize(&mut self, time: &TimeContext) -> Result<(), FastCacheError> {
        let window = self.anchor(time.j2k_utc_days(), *time.deltas())?;
        debug!(
            source = self.source.name(),
            start_tt = window.start_tt(),
            interval_days = window.interval_days,
            "fast cache initialised"
        );
        self.state = FastCacheState::Ready(window);
        Ok(())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &FastCacheConfig {
        &self.config
    }

    pub fn state(&self) -> &FastCacheState {
        &self.state
    }

    pub fn window(&self) -> Option<&CacheWindow> {
        match &self.state {
            FastCacheState::Ready(w) => Some(w),
            FastCacheState::Uninitialized => None,
        }
    }

    /// Approximate topocentric position at a UTC instant.
    pub fn get_approx(
        &self,
        j2k_utc_days: f64,
        site: &SiteContext,
    ) -> Result<TrackedPosition, FastCacheError> {
        let FastCacheState::Ready(window) = &self.state else {
            return Err(FastCacheError::Uninitialized);
        };
        if !j2k_utc_days.is_finite() {
            return Err(FastCacheError::NonFinite(j2k_utc_days));
        }
        let scales = Timescales::new(j2k_utc_days, &window.deltas);
        let tt = scales.j2k_tt_days;
        let (a, b, status) = self.bracket(window, tt)?;

        let span = b.j2k_tt_days - a.j2k_tt_days;
        let u = if span > 0.0 { (tt - a.j2k_tt_days) / span } else { 0.0 };
        let lerp = |x: f64, y: f64| x + (y - x) * u;
        let apparent = ApparentPosition {
            frame: a.frame,
            vector: (a.vector * (1.0 - u) + b.vector * u).normalize(),
            distance_au: lerp(a.distance_au, b.distance_au),
            eq_eq_rad: lerp(a.eq_eq_rad, b.eq_eq_rad),
            j2k_tt_days: tt,
        };
        let theta = angular_separation(&a.vector, &b.vector);
        let error_bound_rad = error_bound(window.curvature_rad, theta, u, status);

        Ok(TrackedPosition {
            topocentric: apparent_to_topocentric(&apparent, &scales, site),
            apparent,
            status,
            error_bound_rad,
        })
    }

    /// Make sure the samples cover a UTC instant. Slides forward by one
    /// window when the instant lies in the look-ahead interval, otherwise
    /// re-samples from the instant. On error the cache is left unchanged.
    pub fn background_update(
        &mut self,
        j2k_utc_days: f64,
    ) -> Result<RefreshOutcome, FastCacheError> {
        let FastCacheState::Ready(window) = self.state else {
            return Err(FastCacheError::Uninitialized);
        };
        if !j2k_utc_days.is_finite() {
            return Err(FastCacheError::NonFinite(j2k_utc_days));
        }
        let deltas = window.deltas;
        let tt = deltas.tt_days(j2k_utc_days);
        if window.in_current(tt) {
            return Ok(RefreshOutcome::Unchanged);
        }
        if window.in_lookahead(tt) {
            let utc = window.one_after.j2k_utc_days + window.interval_days;
            let fresh = self.sample(utc, deltas)?;
            let advanced = CacheWindow::new(
                deltas,
                window.interval_days,
                window.next,
                window.one_after,
                fresh,
            );
            debug!(
                source = self.source.name(),
                start_tt = advanced.start_tt(),
                "fast cache advanced"
            );
            self.state = FastCacheState::Ready(advanced);
            return Ok(RefreshOutcome::Advanced);
        }
        let anchored = self.anchor(j2k_utc_days, deltas)?;
        debug!(
            source = self.source.name(),
            query_tt = tt,
            previous_start_tt = window.start_tt(),
            "fast cache re-anchored"
        );
        self.state = FastCacheState::Ready(anchored);
        Ok(RefreshOutcome::Reanchored)
    }

    /// True when the instant is outside the current `[last, next]` pair,
    /// i.e. the next `background_update` would do work.
    pub fn needs_refresh(&self, j2k_utc_days: f64) -> bool {
        match &self.state {
            FastCacheState::Uninitialized => true,
            FastCacheState::Ready(w) => !w.in_current(w.deltas.tt_days(j2k_utc_days)),
        }
    }

    /// Whether the instant can be interpolated without a refresh.
    pub fn status(&self, j2k_utc_days: f64) -> WindowState {
        match &self.state {
            FastCacheState::Uninitialized => WindowState::Uninitialized,
            FastCacheState::Ready(w) => {
                let tt = w.deltas.tt_days(j2k_utc_days);
                if w.in_current(tt) || w.in_lookahead(tt) {
                    WindowState::Valid
                } else {
                    WindowState::Stale
                }
            }
        }
    }

    fn bracket<'w>(
        &self,
        window: &'w CacheWindow,
        tt: f64,
    ) -> Result<(&'w CacheSample, &'w CacheSample, CacheStatus), FastCacheError> {
        if window.in_current(tt) {
            return Ok((&window.last, &window.next, CacheStatus::Valid));
        }
        if window.in_lookahead(tt) {
            return Ok((&window.next, &window.one_after, CacheStatus::Valid));
        }
        let after = tt > window.end_tt();
        let windows_beyond = if after {
            (tt - window.end_tt()) / window.interval_days
        } else {
            (window.start_tt() - tt) / window.interval_days
        };
        match self.config.stale_policy {
            StalePolicy::Extrapolate { max_windows } if windows_beyond <= max_windows => {
                let status = CacheStatus::Extrapolated { windows_beyond };
                if after {
                    Ok((&window.next, &window.one_after, status))
                } else {
                    Ok((&window.last, &window.next, status))
                }
            }
            _ => Err(FastCacheError::Stale {
                query_tt_days: tt,
                window_start: window.start_tt(),
                window_end: window.end_tt(),
            }),
        }
    }

    fn sample(&self, j2k_utc_days: f64, deltas: DeltaTs) -> Result<CacheSample, FastCacheError> {
        let time = TimeContext::from_j2k_utc(j2k_utc_days, deltas)?;
        let position = self.source.apparent(&time)?;
        Ok(CacheSample::new(j2k_utc_days, &position))
    }

    fn anchor(&self, j2k_utc_days: f64, deltas: DeltaTs) -> Result<CacheWindow, FastCacheError> {
        let w = self.config.window_days();
        let last = self.sample(j2k_utc_days, deltas)?;
        let next = self.sample(j2k_utc_days + w, deltas)?;
        let one_after = self.sample(j2k_utc_days + 2.0 * w, deltas)?;
        Ok(CacheWindow::new(deltas, w, last, next, one_after))
    }
}

/// Error model for a normalised linear interpolation at parameter `u`
/// between two directions `theta` apart, given the curvature estimate.
///
/// Inside the pair the second-order term peaks at `curvature/8` and the
/// chord-to-arc term at `theta³/62`; outside it both grow polynomially in
/// `u`.
pub fn error_bound(curvature_rad: f64, theta_rad: f64, u: f64, status: CacheStatus) -> f64 {
    let theta3 = theta_rad.powi(3);
    let mut model = curvature_rad / 8.0 + theta3 / 60.0;
    if let CacheStatus::Extrapolated { .. } = status {
        model += curvature_rad * (u * (u - 1.0)).abs() / 2.0
            + theta3 * (u * (2.0 * u - 1.0) * (u - 1.0)).abs() / 6.0;
    }
    ERROR_SAFETY * model + ERROR_FLOOR_RAD
}
