//! Fast approximation cache for high-rate tracking.
//!
//! A [`FastCache`] keeps three exact apparent positions of one
//! [`ApparentSource`] a window apart and answers queries in between by
//! interpolation, reporting an error bound with every answer. Exact
//! evaluations happen only in [`FastCache::initialize`] and
//! [`FastCache::background_update`]; [`FastCache::get_approx`] is cheap
//! enough for a servo loop.

pub mod cache;
pub mod config;
pub mod error;
pub mod source;

pub use cache::{
    CacheSample, CacheStatus, CacheWindow, FastCache, FastCacheState, RefreshOutcome,
    TrackedPosition, WindowState, error_bound,
};
pub use config::{DEFAULT_WINDOW_MINUTES, FastCacheConfig, MAX_WINDOW_MINUTES, StalePolicy};
pub use error::FastCacheError;
pub use source::{ApparentSource, MoonSource, SunSource};
