//! The Sun: analytic apparent position, Earth's heliocentric state and
//! rise/set/twilight events.
//!
//! [`sun_apparent`] gives the geocentric apparent place for a
//! [`sky_time::TimeContext`]; [`sun_topocentric`] carries it through the site
//! transform. [`SolarModel::Spa`] swaps in the NREL SPA series where the
//! 0.01° of the default theory is not enough. [`earth_heliocentric`]
//! supplies the parallax and aberration inputs of the star reduction.

pub mod error;
pub mod riseset;
pub mod riseset_types;
pub mod solar;
pub mod spa;

pub use error::{PolarCondition, SunError};
pub use riseset::{
    approximate_local_noon, crossing_hour_angle, solar_noon, solar_noon_with, sun_event,
    sun_events_for_day, sun_rise_set,
};
pub use riseset_types::{RiseSetConfig, RiseSetEvent, SolarEvent};
pub use solar::{
    ABERRATION_ARCSEC, EarthState, SolarCoordinates, earth_heliocentric, solar_coordinates,
    solar_semidiameter_rad, sun_apparent, sun_topocentric,
};
pub use spa::{HeliocentricEarth, SolarModel, earth_heliocentric_spa, sun_apparent_spa};
