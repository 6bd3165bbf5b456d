//! The Moon: analytic apparent position, topocentric place and
//! moonrise/moonset.
//!
//! [`moon_apparent`] gives the geocentric apparent place for a
//! [`sky_time::TimeContext`] with the distance needed for the large diurnal
//! parallax; [`moon_topocentric`] carries it through the site transform.
//! [`moon_event`] and [`moon_rise_set`] search the site-local date.

pub mod error;
pub mod lunar;
pub mod riseset;

pub use error::{LunarCondition, MoonError};
pub use lunar::{
    LunarArguments, LunarCoordinates, MOON_RADIUS_RATIO, lunar_arguments, lunar_coordinates,
    moon_apparent, moon_semidiameter_rad, moon_topocentric,
};
pub use riseset::{MoonEvent, MoonEventKind, MoonRiseSetConfig, moon_event, moon_rise_set};
