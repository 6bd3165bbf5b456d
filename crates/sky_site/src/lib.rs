//! Observer site model and the terrestrial → horizon stage of the reduction.
//!
//! A [`SiteContext`] holds the observer's location, atmosphere, timezone and
//! polar motion, and pre-computes everything the horizon transform needs.
//! [`apparent_to_topocentric`] takes a geocentric [`ApparentPosition`] to
//! azimuth/elevation: Earth rotation (GAST or ERA), polar motion, diurnal
//! parallax, optional diurnal aberration and refraction.
//!
//! Sources:
//! - Site parallax factors: Meeus, _Astronomical Algorithms_ ch. 11.
//! - Refraction: Bennett/Saemundsson low-altitude fits (Meeus ch. 16) and
//!   the classical tan-series above 15°.
//! - Polar motion matrix: IERS Conventions 2010, eq. 5.3 (s′ neglected).

pub mod error;
pub mod horizon;
pub mod position;
pub mod refraction;
pub mod site;
pub mod surface;

pub use error::SiteError;
pub use horizon::{apparent_to_topocentric, horizon_transform};
pub use position::{ApparentPosition, EquatorFrame, HorizonPosition, TopocentricPosition};
pub use refraction::{REFRACTION_CUTOFF_RAD, refraction_rad, refraction_scale};
pub use site::{AU_KM, GeoLocation, PolarMotion, SPEED_OF_LIGHT_KM_S, SiteContext};
pub use surface::Surface;
