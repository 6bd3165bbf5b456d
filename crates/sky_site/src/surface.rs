//! Tilted receiving surfaces (panels, apertures) and incidence angles.

use nalgebra::Vector3;
use sky_frames::angular_separation;

use crate::error::SiteError;
use crate::position::TopocentricPosition;

/// A plane surface described by the direction its normal leans toward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    /// Azimuth the surface faces, degrees from north through east.
    pub azimuth_deg: f64,
    /// Tilt from horizontal, degrees: 0 faces the zenith, 90 is vertical.
    pub slope_deg: f64,
}

impl Surface {
    /// Slope must lie in [0, 180]; azimuth is any finite angle.
    pub fn new(azimuth_deg: f64, slope_deg: f64) -> Result<Self, SiteError> {
        if !(azimuth_deg.is_finite() && slope_deg.is_finite() && (0.0..=180.0).contains(&slope_deg)) {
            return Err(SiteError::InvalidSurface {
                azimuth_deg,
                slope_deg,
            });
        }
        Ok(Self {
            azimuth_deg,
            slope_deg,
        })
    }

    /// Horizontal surface facing the zenith.
    pub fn horizontal() -> Self {
        Self {
            azimuth_deg: 0.0,
            slope_deg: 0.0,
        }
    }

    /// Unit normal in the horizon frame (north, east, zenith).
    pub fn normal(&self) -> Vector3<f64> {
        let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
        let (ss, cs) = self.slope_deg.to_radians().sin_cos();
        Vector3::new(ss * ca, ss * sa, cs)
    }

    /// Angle between the surface normal and the (refracted) direction of a
    /// position, radians in [0, π]. Above π/2 the surface faces away.
    pub fn incidence_rad(&self, position: &TopocentricPosition) -> f64 {
        angular_separation(&self.normal(), &position.horizon.vector)
    }
}
