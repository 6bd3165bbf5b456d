//! Convenience facade over the sky_* astrometric reduction crates.
//!
//! Re-exports the types most callers need and adds [`Observer`], which
//! pairs a [`SiteContext`] with the UT1/TT offsets to reduce with, and the
//! aggregate [`SkyError`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sky_rs::*;
//!
//! let site = SiteContext::new(48.14, 11.58, 520.0)?;
//! let observer = Observer::new(site);
//! let time = observer.time_at_local(&CalendarDate::new(2024, 10, 4, 21, 0, 0.0))?;
//!
//! let vega = CatalogPosition::new("Vega", CoordSystem::Icrs, 4.873_565, 0.676_903);
//! let p = observer.star(&vega, &time)?;
//! println!("az {:.3}° el {:.3}°", p.azimuth_deg(), p.elevation_deg());
//!
//! let mut sun = observer.sun_tracker(&time, FastCacheConfig::default())?;
//! let now = observer.track(&mut sun, time.j2k_utc_days() + 0.01)?;
//!
//! let (moonrise, moonset) = observer.moon_rise_set(&time, &MoonRiseSetConfig::default())?;
//! ```

pub mod error;
pub mod observer;

pub use error::SkyError;
pub use observer::Observer;

// Re-export the crates so callers can reach anything not listed below.
pub use sky_fast;
pub use sky_frames;
pub use sky_moon;
pub use sky_site;
pub use sky_star;
pub use sky_sun;
pub use sky_time;

pub use sky_fast::{
    ApparentSource, CacheStatus, FastCache, FastCacheConfig, FastCacheError, MoonSource,
    RefreshOutcome, StalePolicy, SunSource, TrackedPosition,
};
pub use sky_frames::{Frame, FrameRotation, SphericalCoords, angular_separation};
pub use sky_moon::{LunarCondition, MoonError, MoonEvent, MoonEventKind, MoonRiseSetConfig};
pub use sky_site::{
    ApparentPosition, EquatorFrame, GeoLocation, HorizonPosition, SiteContext, SiteError,
    Surface, TopocentricPosition,
};
pub use sky_star::{CatalogPosition, CatalogRecord, CoordError, CoordSystem, ReductionConfig};
pub use sky_sun::{
    PolarCondition, RiseSetConfig, RiseSetEvent, SolarEvent, SolarModel, SunError,
};
pub use sky_time::{CalendarDate, DeltaTs, TimeContext, TimeError, Timescales};
