//! Star reduction: catalog mean place → apparent place → horizon.
//!
//! [`CatalogRecord`] carries a catalog entry as read, with any field
//! possibly missing; [`CatalogRecord::to_position`] validates it into a
//! [`CatalogPosition`] (strict by default, best-effort on request).
//! [`catalog_to_apparent`] dispatches on the [`CoordSystem`] (ICRS frame
//! bias, FK5 equinox precession, FK4 E-terms and B1950 rotation) and then
//! runs the common chain: space motion, annual parallax, precession,
//! nutation and relativistic annual aberration.
//!
//! Sources: Meeus, _Astronomical Algorithms_ ch. 21–23; Explanatory
//! Supplement to the Astronomical Almanac (1992) §3.2; Aoki et al. 1983,
//! _A&A_ 128, 263.

pub mod catalog;
pub mod error;
pub mod fk4;
pub mod reduction;

pub use catalog::{CatalogPosition, CatalogRecord, CoordSystem, ReductionConfig, UNNAMED};
pub use error::CoordError;
pub use reduction::{
    SpaceMotion, annual_aberration, catalog_to_apparent, catalog_to_topocentric, mean_j2000,
};
