//! Time scales for astrometric reduction.
//!
//! Converts civil calendar dates and Unix timestamps into a continuous day
//! count since J2000.0, applies UT1−UTC and TT−UTC offsets, and evaluates
//! mean and apparent sidereal time. A [`TimeContext`] bundles all of this
//! for one instant, together with the nutation terms the sidereal time
//! depends on.

pub mod calendar;
pub mod context;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod scales;
pub mod sidereal;

pub use calendar::{CalendarDate, validate_timezone};
pub use context::TimeContext;
pub use delta_t::{DeltaTs, builtin_delta_t_s};
pub use error::{CalendarField, TimeError};
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, J2000_JD, SECONDS_PER_DAY,
    besselian_epoch_to_j2k_days, j2k_days_to_unix, julian_epoch_to_j2k_days, unix_to_j2k_days,
};
pub use scales::Timescales;
pub use sidereal::{earth_rotation_angle_rad, gast_rad, gmst_rad, local_sidereal_time_rad};
