//! Catalog → apparent reduction.
//!
//! ```text
//! catalog frame ──space motion──▶ ──system rotation──▶ mean J2000
//!   ──annual parallax──▶ P ▶ mean of date ──N──▶ true of date
//!   ──annual aberration──▶ apparent
//! ```
//!
//! Proper motion and radial velocity are applied linearly in space; light
//! time and gravitational deflection are neglected. The Earth's state comes
//! from the analytic solar theory (heliocentric, standing in for
//! barycentric).

use nalgebra::{Matrix3, Vector3};
use sky_frames::{MAS_TO_RAD, frame_bias, precession_matrix_between, unit_vector};
use sky_site::{ApparentPosition, EquatorFrame, SiteContext, TopocentricPosition, apparent_to_topocentric};
use sky_sun::earth_heliocentric;
use sky_time::{DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, TimeContext, julian_epoch_to_j2k_days};

use crate::catalog::{CatalogPosition, CoordSystem};
use crate::error::CoordError;
use crate::fk4::fk4_to_fk5;

/// Speed of light, AU/day.
pub const C_AU_PER_DAY: f64 = 173.144_632_684_7;
/// 1 AU/yr in km/s.
pub const KM_S_PER_AU_YR: f64 = 4.740_470_446;

/// Direction and space motion of a star at its catalog epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceMotion {
    /// Unit vector.
    pub position: Vector3<f64>,
    /// Rate of change of the direction, including the radial term, per
    /// Julian year (radians/yr for the tangential part).
    pub velocity: Vector3<f64>,
}

impl SpaceMotion {
    /// Position and motion in the catalog's own frame.
    pub fn of(pos: &CatalogPosition) -> Self {
        let (sa, ca) = pos.ra_rad.sin_cos();
        let (sd, cd) = pos.dec_rad.sin_cos();
        let u = unit_vector(pos.ra_rad, pos.dec_rad);
        let e_ra = Vector3::new(-sa, ca, 0.0);
        let e_dec = Vector3::new(-sd * ca, -sd * sa, cd);
        let radial = pos.radial_velocity_km_s * pos.parallax_mas * MAS_TO_RAD / KM_S_PER_AU_YR;
        Self {
            position: u,
            velocity: e_ra * (pos.pm_ra_mas_yr * MAS_TO_RAD)
                + e_dec * (pos.pm_dec_mas_yr * MAS_TO_RAD)
                + u * radial,
        }
    }

    fn rotated(&self, m: &Matrix3<f64>) -> Self {
        Self {
            position: m * self.position,
            velocity: m * self.velocity,
        }
    }
}

/// Space motion carried into the mean equator and equinox of J2000.
///
/// `None` for positions that are already apparent or intermediate.
pub fn mean_j2000(pos: &CatalogPosition) -> Option<SpaceMotion> {
    let local = SpaceMotion::of(pos);
    match pos.system {
        CoordSystem::Apparent | CoordSystem::Intermediate => None,
        CoordSystem::Icrs => Some(local.rotated(&frame_bias().matrix)),
        CoordSystem::Fk5 => {
            let t0 = julian_epoch_to_j2k_days(pos.equinox_yr) / DAYS_PER_JULIAN_CENTURY;
            Some(local.rotated(&precession_matrix_between(t0, 0.0)))
        }
        CoordSystem::Fk4 => {
            let (position, velocity) = fk4_to_fk5(&local.position, &local.velocity, pos.equinox_yr);
            Some(SpaceMotion { position, velocity })
        }
    }
}

/// Relativistic annual aberration of a unit vector `p` for an observer
/// moving at `beta` (velocity / c).
pub fn annual_aberration(p: &Vector3<f64>, beta: &Vector3<f64>) -> Vector3<f64> {
    let inv_gamma = (1.0 - beta.norm_squared()).sqrt();
    let p_dot_b = p.dot(beta);
    let shifted = p * inv_gamma + beta * (1.0 + p_dot_b / (1.0 + inv_gamma));
    (shifted / (1.0 + p_dot_b)).normalize()
}

/// Apparent geocentric place of a catalog position at `time`.
pub fn catalog_to_apparent(
    pos: &CatalogPosition,
    time: &TimeContext,
) -> Result<ApparentPosition, CoordError> {
    pos.validate()?;
    let tagged = |frame, vector| ApparentPosition {
        frame,
        vector,
        distance_au: pos.distance_au(),
        eq_eq_rad: time.eq_eq_rad(),
        j2k_tt_days: time.j2k_tt_days(),
    };

    let Some(mean) = mean_j2000(pos) else {
        let frame = match pos.system {
            CoordSystem::Intermediate => EquatorFrame::Intermediate,
            _ => EquatorFrame::Apparent,
        };
        return Ok(tagged(frame, unit_vector(pos.ra_rad, pos.dec_rad)));
    };

    let years = (time.j2k_tt_days() - pos.epoch_j2k_days()) / DAYS_PER_JULIAN_YEAR;
    let earth = earth_heliocentric(time.tt_centuries());
    let parallax_rad = pos.parallax_mas * MAS_TO_RAD;
    let astrometric =
        (mean.position + mean.velocity * years - earth.position_au * parallax_rad).normalize();

    let np = time.precession_nutation().np;
    let true_of_date = np.apply(&astrometric);
    let beta = np.apply(&earth.velocity_au_d) / C_AU_PER_DAY;
    let apparent = annual_aberration(&true_of_date, &beta);

    if !apparent.iter().all(|x| x.is_finite()) {
        return Err(CoordError::NonFinite);
    }
    Ok(tagged(EquatorFrame::Apparent, apparent))
}

/// Azimuth and elevation of a catalog position from a site.
pub fn catalog_to_topocentric(
    pos: &CatalogPosition,
    time: &TimeContext,
    site: &SiteContext,
) -> Result<TopocentricPosition, CoordError> {
    let apparent = catalog_to_apparent(pos, time)?;
    Ok(apparent_to_topocentric(&apparent, time.scales(), site))
}
