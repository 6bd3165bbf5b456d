//! Catalog entries: raw records and validated positions.

use std::f64::consts::{FRAC_PI_2, TAU};

use sky_frames::normalize_rad;
use sky_time::{besselian_epoch_to_j2k_days, julian_epoch_to_j2k_days};
use tracing::warn;

use crate::error::CoordError;

/// Name given to anonymous entries in best-effort mode.
pub const UNNAMED: &str = "unnamed";

/// Reference system a catalog position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordSystem {
    /// Already apparent: true equator and equinox of date.
    Apparent,
    /// Celestial intermediate frame of date (CIO origin).
    Intermediate,
    /// FK4, Besselian epoch and equinox (E-terms included).
    Fk4,
    /// FK5, Julian epoch and equinox.
    Fk5,
    Icrs,
}

impl CoordSystem {
    /// Equinox assumed when none is given, years.
    pub fn default_equinox(self) -> f64 {
        match self {
            Self::Fk4 => 1950.0,
            _ => 2000.0,
        }
    }

    /// Day count (J2000-based) of an epoch or equinox year in this system's
    /// convention: Besselian for FK4, Julian otherwise.
    pub fn epoch_to_j2k_days(self, year: f64) -> f64 {
        match self {
            Self::Fk4 => besselian_epoch_to_j2k_days(year),
            _ => julian_epoch_to_j2k_days(year),
        }
    }
}

/// Reduction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReductionConfig {
    /// Substitute defaults for some missing or out-of-range fields instead
    /// of failing: a placeholder name, RA wrapped into [0, 2π), a missing
    /// proper-motion component set to zero, a missing epoch taken from the
    /// equinox. Each substitution is logged at `warn`.
    pub best_effort: bool,
}

/// A validated catalog position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogPosition {
    pub name: String,
    pub system: CoordSystem,
    /// Right ascension, radians in [0, 2π).
    pub ra_rad: f64,
    /// Declination, radians in [−π/2, π/2].
    pub dec_rad: f64,
    /// μα·cos δ, mas/yr.
    pub pm_ra_mas_yr: f64,
    /// μδ, mas/yr.
    pub pm_dec_mas_yr: f64,
    pub parallax_mas: f64,
    /// Positive receding.
    pub radial_velocity_km_s: f64,
    /// Epoch of the position, years (Besselian for FK4).
    pub epoch_yr: f64,
    /// Equinox of the frame, years (Besselian for FK4).
    pub equinox_yr: f64,
}

impl CatalogPosition {
    /// A fixed position at the system's default equinox and epoch.
    pub fn new(name: impl Into<String>, system: CoordSystem, ra_rad: f64, dec_rad: f64) -> Self {
        let equinox = system.default_equinox();
        Self {
            name: name.into(),
            system,
            ra_rad,
            dec_rad,
            pm_ra_mas_yr: 0.0,
            pm_dec_mas_yr: 0.0,
            parallax_mas: 0.0,
            radial_velocity_km_s: 0.0,
            epoch_yr: equinox,
            equinox_yr: equinox,
        }
    }

    pub fn with_proper_motion(mut self, pm_ra_mas_yr: f64, pm_dec_mas_yr: f64, epoch_yr: f64) -> Self {
        self.pm_ra_mas_yr = pm_ra_mas_yr;
        self.pm_dec_mas_yr = pm_dec_mas_yr;
        self.epoch_yr = epoch_yr;
        self
    }

    pub fn with_parallax(mut self, parallax_mas: f64) -> Self {
        self.parallax_mas = parallax_mas;
        self
    }

    pub fn with_radial_velocity(mut self, radial_velocity_km_s: f64) -> Self {
        self.radial_velocity_km_s = radial_velocity_km_s;
        self
    }

    pub fn with_equinox(mut self, equinox_yr: f64) -> Self {
        self.equinox_yr = equinox_yr;
        self
    }

    /// Check ranges and finiteness of every field.
    pub fn validate(&self) -> Result<(), CoordError> {
        if self.name.trim().is_empty() {
            return Err(CoordError::MissingIdentity);
        }
        check_ra(self.ra_rad)?;
        check_dec(self.dec_rad)?;
        if !self.pm_ra_mas_yr.is_finite() {
            return Err(CoordError::InvalidPmRa(self.pm_ra_mas_yr));
        }
        if !self.pm_dec_mas_yr.is_finite() {
            return Err(CoordError::InvalidPmDec(self.pm_dec_mas_yr));
        }
        check_parallax(self.parallax_mas)?;
        if !self.radial_velocity_km_s.is_finite() {
            return Err(CoordError::InvalidRadialVelocity(self.radial_velocity_km_s));
        }
        check_epoch(self.epoch_yr)?;
        check_epoch(self.equinox_yr)?;
        Ok(())
    }

    /// Epoch of the position as TT days since J2000.0.
    pub fn epoch_j2k_days(&self) -> f64 {
        self.system.epoch_to_j2k_days(self.epoch_yr)
    }

    /// Distance in AU from the parallax; 0 when the parallax is 0.
    pub fn distance_au(&self) -> f64 {
        if self.parallax_mas > 0.0 {
            1.0 / (self.parallax_mas * sky_frames::MAS_TO_RAD)
        } else {
            0.0
        }
    }
}

/// A catalog entry as read, with every field optional.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogRecord {
    pub name: Option<String>,
    pub system: CoordSystem,
    pub ra_rad: Option<f64>,
    pub dec_rad: Option<f64>,
    pub pm_ra_mas_yr: Option<f64>,
    pub pm_dec_mas_yr: Option<f64>,
    pub parallax_mas: Option<f64>,
    pub radial_velocity_km_s: Option<f64>,
    pub epoch_yr: Option<f64>,
    pub equinox_yr: Option<f64>,
}

impl CatalogRecord {
    /// An empty record in a reference system.
    pub fn new(system: CoordSystem) -> Self {
        Self {
            name: None,
            system,
            ra_rad: None,
            dec_rad: None,
            pm_ra_mas_yr: None,
            pm_dec_mas_yr: None,
            parallax_mas: None,
            radial_velocity_km_s: None,
            epoch_yr: None,
            equinox_yr: None,
        }
    }

    /// Validate into a [`CatalogPosition`], substituting defaults where
    /// `config` allows it.
    pub fn to_position(&self, config: &ReductionConfig) -> Result<CatalogPosition, CoordError> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ if config.best_effort => {
                warn!("catalog entry without a name; using placeholder");
                UNNAMED.to_string()
            }
            _ => return Err(CoordError::MissingIdentity),
        };

        let ra = self.ra_rad.ok_or(CoordError::MissingRa)?;
        let ra = match check_ra(ra) {
            Err(CoordError::RaOutOfRange(bad)) if config.best_effort => {
                let wrapped = normalize_rad(bad);
                warn!(star = %name, ra_rad = bad, wrapped = wrapped, "right ascension wrapped into [0, 2π)");
                wrapped
            }
            Err(e) => return Err(e),
            Ok(()) => ra,
        };
        let dec = self.dec_rad.ok_or(CoordError::MissingDec)?;
        check_dec(dec)?;

        let (pm_ra, pm_dec) = match (self.pm_ra_mas_yr, self.pm_dec_mas_yr) {
            (Some(a), Some(d)) => (Some(a), Some(d)),
            (Some(a), None) if config.best_effort => {
                warn!(star = %name, "proper motion in declination missing; using 0");
                (Some(a), Some(0.0))
            }
            (None, Some(d)) if config.best_effort => {
                warn!(star = %name, "proper motion in right ascension missing; using 0");
                (Some(0.0), Some(d))
            }
            (Some(_), None) => return Err(CoordError::MissingPmDec),
            (None, Some(_)) => return Err(CoordError::MissingPmRa),
            (None, None) => (None, None),
        };
        if let Some(a) = pm_ra.filter(|a| !a.is_finite()) {
            return Err(CoordError::InvalidPmRa(a));
        }
        if let Some(d) = pm_dec.filter(|d| !d.is_finite()) {
            return Err(CoordError::InvalidPmDec(d));
        }
        let has_pm = pm_ra.is_some();

        if let Some(p) = self.parallax_mas {
            check_parallax(p)?;
            if !has_pm {
                return Err(CoordError::ParallaxNeedsProperMotion { parallax_mas: p });
            }
        }
        if let Some(rv) = self.radial_velocity_km_s {
            if !rv.is_finite() {
                return Err(CoordError::InvalidRadialVelocity(rv));
            }
            if !has_pm {
                return Err(CoordError::RadialVelocityNeedsProperMotion {
                    radial_velocity_km_s: rv,
                });
            }
        }

        let equinox = self.equinox_yr.unwrap_or(self.system.default_equinox());
        check_epoch(equinox)?;
        let epoch = match self.epoch_yr {
            Some(e) => e,
            None if has_pm && !config.best_effort => return Err(CoordError::MissingEpoch),
            None => {
                if has_pm {
                    warn!(star = %name, equinox = equinox, "epoch missing; using the equinox");
                }
                equinox
            }
        };
        check_epoch(epoch)?;

        Ok(CatalogPosition {
            name,
            system: self.system,
            ra_rad: ra,
            dec_rad: dec,
            pm_ra_mas_yr: pm_ra.unwrap_or(0.0),
            pm_dec_mas_yr: pm_dec.unwrap_or(0.0),
            parallax_mas: self.parallax_mas.unwrap_or(0.0),
            radial_velocity_km_s: self.radial_velocity_km_s.unwrap_or(0.0),
            epoch_yr: epoch,
            equinox_yr: equinox,
        })
    }
}

fn check_ra(ra: f64) -> Result<(), CoordError> {
    if !ra.is_finite() {
        Err(CoordError::InvalidRa(ra))
    } else if !(0.0..TAU).contains(&ra) {
        Err(CoordError::RaOutOfRange(ra))
    } else {
        Ok(())
    }
}

fn check_dec(dec: f64) -> Result<(), CoordError> {
    if !dec.is_finite() {
        Err(CoordError::InvalidDec(dec))
    } else if dec.abs() > FRAC_PI_2 {
        Err(CoordError::DecOutOfRange(dec))
    } else {
        Ok(())
    }
}

fn check_parallax(p: f64) -> Result<(), CoordError> {
    if p.is_finite() && p >= 0.0 {
        Ok(())
    } else {
        Err(CoordError::InvalidParallax(p))
    }
}

fn check_epoch(year: f64) -> Result<(), CoordError> {
    if year.is_finite() {
        Ok(())
    } else {
        Err(CoordError::InvalidEpoch(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sirius() -> CatalogRecord {
        CatalogRecord {
            name: Some("Sirius".into()),
            ra_rad: Some(1.767_791_9),
            dec_rad: Some(-0.291_751_2),
            pm_ra_mas_yr: Some(-546.01),
            pm_dec_mas_yr: Some(-1223.07),
            parallax_mas: Some(379.21),
            radial_velocity_km_s: Some(-5.5),
            epoch_yr: Some(2000.0),
            ..CatalogRecord::new(CoordSystem::Icrs)
        }
    }

    const STRICT: ReductionConfig = ReductionConfig { best_effort: false };
    const LENIENT: ReductionConfig = ReductionConfig { best_effort: true };

    #[test]
    fn complete_record_validates() {
        let p = sirius().to_position(&STRICT).unwrap();
        assert_eq!(p.name, "Sirius");
        assert_eq!(p.equinox_yr, 2000.0);
        assert!(p.validate().is_ok());
        assert!((p.distance_au() - 543_930.0).abs() < 100.0, "{}", p.distance_au());
    }

    #[test]
    fn missing_identity() {
        let r = CatalogRecord { name: Some("  ".into()), ..sirius() };
        assert_eq!(r.to_position(&STRICT), Err(CoordError::MissingIdentity));
        assert_eq!(r.to_position(&LENIENT).unwrap().name, UNNAMED);
    }

    #[test]
    fn ra_out_of_range() {
        let r = CatalogRecord { ra_rad: Some(7.0), ..sirius() };
        assert_eq!(r.to_position(&STRICT), Err(CoordError::RaOutOfRange(7.0)));
        let p = r.to_position(&LENIENT).unwrap();
        assert!((p.ra_rad - (7.0 - TAU)).abs() < 1e-12);
        let r = CatalogRecord { ra_rad: Some(f64::NAN), ..sirius() };
        assert!(matches!(r.to_position(&LENIENT), Err(CoordError::InvalidRa(_))));
    }

    #[test]
    fn dec_out_of_range_even_in_best_effort() {
        let r = CatalogRecord { dec_rad: Some(1.6), ..sirius() };
        assert_eq!(r.to_position(&LENIENT), Err(CoordError::DecOutOfRange(1.6)));
        let r = CatalogRecord { dec_rad: None, ..sirius() };
        assert_eq!(r.to_position(&LENIENT), Err(CoordError::MissingDec));
    }

    #[test]
    fn single_missing_proper_motion_component() {
        let r = CatalogRecord { pm_dec_mas_yr: None, ..sirius() };
        assert_eq!(r.to_position(&STRICT), Err(CoordError::MissingPmDec));
        assert_eq!(r.to_position(&LENIENT).unwrap().pm_dec_mas_yr, 0.0);
        let r = CatalogRecord { pm_ra_mas_yr: None, ..sirius() };
        assert_eq!(r.to_position(&STRICT), Err(CoordError::MissingPmRa));
    }

    #[test]
    fn parallax_and_velocity_need_proper_motion() {
        let r = CatalogRecord {
            pm_ra_mas_yr: None,
            pm_dec_mas_yr: None,
            radial_velocity_km_s: None,
            ..sirius()
        };
        assert_eq!(
            r.to_position(&LENIENT),
            Err(CoordError::ParallaxNeedsProperMotion { parallax_mas: 379.21 })
        );
        let r = CatalogRecord { parallax_mas: None, ..r };
        let r = CatalogRecord { radial_velocity_km_s: Some(-5.5), ..r };
        assert_eq!(
            r.to_position(&STRICT),
            Err(CoordError::RadialVelocityNeedsProperMotion { radial_velocity_km_s: -5.5 })
        );
    }

    #[test]
    fn epoch_required_with_proper_motion() {
        let r = CatalogRecord { epoch_yr: None, ..sirius() };
        assert_eq!(r.to_position(&STRICT), Err(CoordError::MissingEpoch));
        assert_eq!(r.to_position(&LENIENT).unwrap().epoch_yr, 2000.0);
        let fixed = CatalogRecord {
            name: Some("fixed".into()),
            ra_rad: Some(1.0),
            dec_rad: Some(0.5),
            ..CatalogRecord::new(CoordSystem::Fk4)
        };
        let p = fixed.to_position(&STRICT).unwrap();
        assert_eq!((p.epoch_yr, p.equinox_yr), (1950.0, 1950.0));
    }

    #[test]
    fn negative_parallax_is_invalid() {
        let r = CatalogRecord { parallax_mas: Some(-1.0), ..sirius() };
        assert_eq!(r.to_position(&LENIENT), Err(CoordError::InvalidParallax(-1.0)));
    }

    #[test]
    fn position_validate_catches_mutation() {
        let mut p = sirius().to_position(&STRICT).unwrap();
        p.dec_rad = -2.0;
        assert_eq!(p.validate(), Err(CoordError::DecOutOfRange(-2.0)));
        p.dec_rad = 0.0;
        p.epoch_yr = f64::INFINITY;
        assert_eq!(p.validate(), Err(CoordError::InvalidEpoch(f64::INFINITY)));
    }
}
