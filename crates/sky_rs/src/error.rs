use sky_fast::FastCacheError;
use sky_moon::MoonError;
use sky_site::SiteError;
use sky_star::CoordError;
use sky_sun::SunError;
use sky_time::TimeError;
use thiserror::Error;

/// Any error from the reduction crates.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SkyError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Coord(#[from] CoordError),
    #[error(transparent)]
    Sun(#[from] SunError),
    #[error(transparent)]
    Moon(#[from] MoonError),
    #[error(transparent)]
    FastCache(#[from] FastCacheError),
    #[error("system clock before 1970")]
    Clock,
}
