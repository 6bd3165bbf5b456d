//! Objects the cache can track.

use sky_moon::moon_apparent;
use sky_site::ApparentPosition;
use sky_star::{CatalogPosition, catalog_to_apparent};
use sky_sun::{SolarModel, sun_apparent};
use sky_time::TimeContext;

use crate::error::FastCacheError;

/// Anything with an exact geocentric apparent (or intermediate) position.
pub trait ApparentSource {
    fn name(&self) -> &str;

    /// Exact position at one instant.
    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError>;
}

impl ApparentSource for CatalogPosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        Ok(catalog_to_apparent(self, time)?)
    }
}

/// The Sun, from the analytic solar theory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SunSource;

impl ApparentSource for SunSource {
    fn name(&self) -> &str {
        "Sun"
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        Ok(sun_apparent(time))
    }
}

/// The Sun from a chosen solar theory.
impl ApparentSource for SolarModel {
    fn name(&self) -> &str {
        "Sun"
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        Ok(SolarModel::apparent(*self, time))
    }
}

/// The Moon, from the analytic lunar theory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoonSource;

impl ApparentSource for MoonSource {
    fn name(&self) -> &str {
        "Moon"
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        Ok(moon_apparent(time))
    }
}

impl<T: ApparentSource + ?Sized> ApparentSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        (**self).apparent(time)
    }
}

impl<T: ApparentSource + ?Sized> ApparentSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apparent(&self, time: &TimeContext) -> Result<ApparentPosition, FastCacheError> {
        (**self).apparent(time)
    }
}
