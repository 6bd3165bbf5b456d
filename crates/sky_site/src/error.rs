//! Error types for site configuration.

use thiserror::Error;

/// A site parameter was rejected by its setter.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SiteError {
    #[error("latitude {0}° outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0}° outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("height {0} m outside [-12000, 100000]")]
    InvalidHeight(f64),
    #[error("temperature {0} °C outside (-100, 100)")]
    InvalidTemperature(f64),
    #[error("pressure {0} hPa outside [0, 1500]")]
    InvalidPressure(f64),
    #[error("timezone offset {0} h outside [-14, 14]")]
    InvalidTimezone(f64),
    #[error("polar motion ({x_rad}, {y_rad}) rad not finite or above 1'")]
    InvalidPolarMotion { x_rad: f64, y_rad: f64 },
    #[error("surface azimuth {azimuth_deg}° / slope {slope_deg}° invalid")]
    InvalidSurface { azimuth_deg: f64, slope_deg: f64 },
}
