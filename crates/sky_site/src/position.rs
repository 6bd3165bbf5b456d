//! Geocentric apparent and topocentric positions.

use nalgebra::Vector3;
use sky_frames::{Frame, FrameRotation, cartesian_to_spherical, rot_z};
use sky_time::{earth_rotation_angle_rad, gast_rad, gmst_rad};

use crate::site::GeoLocation;

/// Equatorial frame an [`ApparentPosition`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquatorFrame {
    /// True equator and equinox of date; rotated to the Earth by GAST.
    Apparent,
    /// True equator of date, CIO origin; rotated to the Earth by the ERA.
    Intermediate,
}

impl EquatorFrame {
    pub fn frame(self) -> Frame {
        match self {
            Self::Apparent => Frame::TrueOfDate,
            Self::Intermediate => Frame::Intermediate,
        }
    }
}

/// Geocentric direction of an object at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPosition {
    pub frame: EquatorFrame,
    /// Unit vector.
    pub vector: Vector3<f64>,
    /// Geocentric distance in AU; 0 for objects at infinity.
    pub distance_au: f64,
    /// Equation of the equinoxes of the instant, radians.
    pub eq_eq_rad: f64,
    /// TT days since J2000.0 of the instant.
    pub j2k_tt_days: f64,
}

impl ApparentPosition {
    /// Right ascension and declination, radians; RA in [0, 2π).
    pub fn ra_dec(&self) -> (f64, f64) {
        let s = cartesian_to_spherical(&self.vector);
        (s.lon_rad, s.lat_rad)
    }

    /// Angle turning this frame into the terrestrial intermediate frame at
    /// the given UT1: GAST for apparent positions, ERA for intermediate ones.
    pub fn earth_angle_rad(&self, j2k_ut1_days: f64) -> f64 {
        match self.frame {
            EquatorFrame::Apparent => gast_rad(gmst_rad(j2k_ut1_days), self.eq_eq_rad),
            EquatorFrame::Intermediate => earth_rotation_angle_rad(j2k_ut1_days),
        }
    }

    /// Earth rotation for the given UT1 as a tagged rotation.
    pub fn earth_rotation(&self, j2k_ut1_days: f64) -> FrameRotation {
        FrameRotation::new(
            self.frame.frame(),
            Frame::Terrestrial,
            rot_z(self.earth_angle_rad(j2k_ut1_days)),
        )
    }

    /// Direction in the terrestrial intermediate frame.
    pub fn to_terrestrial(&self, j2k_ut1_days: f64) -> Vector3<f64> {
        self.earth_rotation(j2k_ut1_days).apply(&self.vector)
    }
}

/// Horizon coordinates produced by the site transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonPosition {
    /// Azimuth from north through east, radians in [0, 2π).
    pub azimuth_rad: f64,
    /// Refracted elevation, radians.
    pub elevation_rad: f64,
    /// Elevation before refraction, radians.
    pub geometric_elevation_rad: f64,
    /// Refraction applied, radians.
    pub refraction_rad: f64,
    /// Refracted unit vector, horizon frame (north, east, zenith).
    pub vector: Vector3<f64>,
}

/// Horizon coordinates tagged with the instant and site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricPosition {
    pub horizon: HorizonPosition,
    /// UTC days since J2000.0.
    pub j2k_utc_days: f64,
    pub location: GeoLocation,
}

impl TopocentricPosition {
    pub fn azimuth_deg(&self) -> f64 {
        self.horizon.azimuth_rad.to_degrees()
    }

    pub fn elevation_deg(&self) -> f64 {
        self.horizon.elevation_rad.to_degrees()
    }

    /// Zenith distance of the refracted position, radians.
    pub fn zenith_distance_rad(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.horizon.elevation_rad
    }
}
