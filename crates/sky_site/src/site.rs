//! Observer site: location, atmosphere, timezone and polar motion.
//!
//! Every setter validates its input and then re-derives the quantities the
//! horizon transform consumes (parallax factors, refraction scale, horizon
//! matrices), so a `SiteContext` is always internally consistent.

use nalgebra::Matrix3;
use sky_frames::{ARCSEC_TO_RAD, rot_x, rot_y};
use sky_time::calendar::MAX_TIMEZONE_HOURS;

use crate::error::SiteError;
use crate::refraction::refraction_scale;

/// Flattening of the reference ellipsoid (IAU 1976).
pub const EARTH_FLATTENING: f64 = 1.0 - 0.996_647_19;
/// Equatorial radius, km (IAU 1976).
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.140;
/// Astronomical unit, km.
pub const AU_KM: f64 = 1.496_003_9e8;
/// Speed of light, km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;
/// Earth's rotation rate, rad/s.
pub const EARTH_ROTATION_RATE_RAD_S: f64 = 7.292_115e-5;
/// Largest accepted polar-motion component.
pub const MAX_POLAR_MOTION_RAD: f64 = 60.0 * ARCSEC_TO_RAD;

const MIN_HEIGHT_M: f64 = -12_000.0;
const MAX_HEIGHT_M: f64 = 100_000.0;

/// Geodetic position on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoLocation {
    /// Latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Height above the ellipsoid in meters.
    pub height_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if !(self.latitude_deg.is_finite() && self.latitude_deg.abs() <= 90.0) {
            return Err(SiteError::InvalidLatitude(self.latitude_deg));
        }
        if !(self.longitude_deg.is_finite() && self.longitude_deg.abs() <= 180.0) {
            return Err(SiteError::InvalidLongitude(self.longitude_deg));
        }
        if !(self.height_m.is_finite() && (MIN_HEIGHT_M..=MAX_HEIGHT_M).contains(&self.height_m)) {
            return Err(SiteError::InvalidHeight(self.height_m));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Pole offsets (x_p, y_p) of the CIP in the terrestrial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarMotion {
    pub x_rad: f64,
    pub y_rad: f64,
}

/// Quantities derived from the site parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SiteGeometry {
    geocentric_radius_km: f64,
    rho_sin_au: f64,
    rho_cos_au: f64,
    diurnal_aberration_rad: f64,
    refraction_scale: f64,
    horizon_base: Matrix3<f64>,
    horizon: Matrix3<f64>,
    hour_angle: Matrix3<f64>,
}

/// An observer site and everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteContext {
    geodetic: GeoLocation,
    astronomical_lat_rad: f64,
    astronomical_lon_rad: f64,
    temperature_c: f64,
    pressure_hpa: f64,
    timezone_hours: f64,
    polar_motion: Option<PolarMotion>,
    diurnal_aberration: bool,
    geometry: SiteGeometry,
}

impl SiteContext {
    /// Site at a geodetic location, standard atmosphere (10 °C, 1010 hPa),
    /// UTC, no polar motion.
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Result<Self, SiteError> {
        Self::with_astronomical(latitude_deg, longitude_deg, latitude_deg, longitude_deg, height_m)
    }

    /// Site whose astronomical (plumb-line) coordinates differ from the
    /// geodetic ones by the deflection of the vertical.
    pub fn with_astronomical(
        astronomical_lat_deg: f64,
        astronomical_lon_deg: f64,
        geodetic_lat_deg: f64,
        geodetic_lon_deg: f64,
        height_m: f64,
    ) -> Result<Self, SiteError> {
        let geodetic = GeoLocation::new(geodetic_lat_deg, geodetic_lon_deg, height_m);
        geodetic.validate()?;
        GeoLocation::new(astronomical_lat_deg, astronomical_lon_deg, height_m).validate()?;
        let mut site = Self {
            geodetic,
            astronomical_lat_rad: astronomical_lat_deg.to_radians(),
            astronomical_lon_rad: astronomical_lon_deg.to_radians(),
            temperature_c: 10.0,
            pressure_hpa: 1010.0,
            timezone_hours: 0.0,
            polar_motion: None,
            diurnal_aberration: false,
            geometry: SiteGeometry {
                geocentric_radius_km: 0.0,
                rho_sin_au: 0.0,
                rho_cos_au: 0.0,
                diurnal_aberration_rad: 0.0,
                refraction_scale: 1.0,
                horizon_base: Matrix3::identity(),
                horizon: Matrix3::identity(),
                hour_angle: Matrix3::identity(),
            },
        };
        site.setup();
        Ok(site)
    }

    /// Move the site, keeping atmosphere, timezone and polar motion.
    pub fn set_location(
        &mut self,
        latitude_deg: f64,
        longitude_deg: f64,
        height_m: f64,
    ) -> Result<(), SiteError> {
        let geodetic = GeoLocation::new(latitude_deg, longitude_deg, height_m);
        geodetic.validate()?;
        self.geodetic = geodetic;
        self.astronomical_lat_rad = geodetic.latitude_rad();
        self.astronomical_lon_rad = geodetic.longitude_rad();
        self.setup();
        Ok(())
    }

    /// Air temperature (°C) and pressure (hPa) for the refraction model.
    /// Zero pressure disables refraction.
    pub fn set_temp_press(&mut self, temperature_c: f64, pressure_hpa: f64) -> Result<(), SiteError> {
        if !(temperature_c.is_finite() && temperature_c > -100.0 && temperature_c < 100.0) {
            return Err(SiteError::InvalidTemperature(temperature_c));
        }
        if !(pressure_hpa.is_finite() && (0.0..=1500.0).contains(&pressure_hpa)) {
            return Err(SiteError::InvalidPressure(pressure_hpa));
        }
        self.temperature_c = temperature_c;
        self.pressure_hpa = pressure_hpa;
        self.setup();
        Ok(())
    }

    /// Local timezone, hours east of UTC.
    pub fn set_timezone(&mut self, hours: f64) -> Result<(), SiteError> {
        if !(hours.is_finite() && hours.abs() <= MAX_TIMEZONE_HOURS) {
            return Err(SiteError::InvalidTimezone(hours));
        }
        self.timezone_hours = hours;
        Ok(())
    }

    /// Pole coordinates x_p, y_p in radians (IERS bulletin values).
    pub fn set_polar_motion(&mut self, x_rad: f64, y_rad: f64) -> Result<(), SiteError> {
        let ok = |v: f64| v.is_finite() && v.abs() <= MAX_POLAR_MOTION_RAD;
        if !(ok(x_rad) && ok(y_rad)) {
            return Err(SiteError::InvalidPolarMotion { x_rad, y_rad });
        }
        self.polar_motion = Some(PolarMotion { x_rad, y_rad });
        self.setup();
        Ok(())
    }

    pub fn clear_polar_motion(&mut self) {
        self.polar_motion = None;
        self.setup();
    }

    /// Apply diurnal aberration (up to 0.32″) in the horizon transform.
    pub fn set_diurnal_aberration(&mut self, enabled: bool) {
        self.diurnal_aberration = enabled;
    }

    /// Re-derive geometry after any parameter change.
    fn setup(&mut self) {
        let phi = self.geodetic.latitude_rad();
        let h_km = self.geodetic.height_m / 1000.0;
        let (sin_phi, cos_phi) = phi.sin_cos();

        let f = EARTH_FLATTENING;
        let e2 = 2.0 * f - f * f;
        let w = (1.0 - e2 * sin_phi * sin_phi).sqrt();
        // Prime-vertical radius of curvature.
        let n = EARTH_EQUATORIAL_RADIUS_KM / w;
        let axial_km = (n + h_km) * cos_phi;
        let polar_km = (n * (1.0 - e2) + h_km) * sin_phi;

        let (sin_lat, cos_lat) = self.astronomical_lat_rad.sin_cos();
        let (sin_lon, cos_lon) = self.astronomical_lon_rad.sin_cos();
        #[rustfmt::skip]
        let horizon_base = Matrix3::new(
            -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
            -sin_lon,           cos_lon,            0.0,
            cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
        );
        let horizon = match self.polar_motion {
            Some(pm) => horizon_base * rot_x(-pm.y_rad) * rot_y(-pm.x_rad),
            None => horizon_base,
        };
        #[rustfmt::skip]
        let hour_angle = Matrix3::new(
            -sin_lat, 0.0,  cos_lat,
            0.0,      -1.0, 0.0,
            cos_lat,  0.0,  sin_lat,
        );

        self.geometry = SiteGeometry {
            geocentric_radius_km: axial_km.hypot(polar_km),
            rho_sin_au: n * e2 * sin_phi * cos_phi / AU_KM,
            rho_cos_au: -(EARTH_EQUATORIAL_RADIUS_KM * w + h_km) / AU_KM,
            diurnal_aberration_rad: EARTH_ROTATION_RATE_RAD_S * axial_km / SPEED_OF_LIGHT_KM_S,
            refraction_scale: refraction_scale(self.temperature_c, self.pressure_hpa),
            horizon_base,
            horizon,
            hour_angle,
        };
    }

    pub fn location(&self) -> &GeoLocation {
        &self.geodetic
    }

    pub fn astronomical_latitude_rad(&self) -> f64 {
        self.astronomical_lat_rad
    }

    pub fn astronomical_longitude_rad(&self) -> f64 {
        self.astronomical_lon_rad
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn pressure_hpa(&self) -> f64 {
        self.pressure_hpa
    }

    pub fn timezone_hours(&self) -> f64 {
        self.timezone_hours
    }

    pub fn polar_motion(&self) -> Option<PolarMotion> {
        self.polar_motion
    }

    pub fn diurnal_aberration_enabled(&self) -> bool {
        self.diurnal_aberration
    }

    /// Distance from the geocenter, km.
    pub fn geocentric_radius_km(&self) -> f64 {
        self.geometry.geocentric_radius_km
    }

    /// Horizon-frame north component of the geocentric-to-site offset,
    /// sign-reversed, in AU.
    pub fn rho_sin_au(&self) -> f64 {
        self.geometry.rho_sin_au
    }

    /// Horizon-frame zenith component of the geocentric-to-site offset,
    /// sign-reversed, in AU.
    pub fn rho_cos_au(&self) -> f64 {
        self.geometry.rho_cos_au
    }

    /// Eastward shift from diurnal aberration, radians.
    pub fn diurnal_aberration_rad(&self) -> f64 {
        self.geometry.diurnal_aberration_rad
    }

    /// Pressure/temperature scale applied to the standard refraction.
    pub fn refraction_scale(&self) -> f64 {
        self.geometry.refraction_scale
    }

    /// Terrestrial → horizon matrix without polar motion.
    pub fn horizon_base_matrix(&self) -> &Matrix3<f64> {
        &self.geometry.horizon_base
    }

    /// Terrestrial intermediate → horizon matrix, polar motion included.
    pub fn horizon_matrix(&self) -> &Matrix3<f64> {
        &self.geometry.horizon
    }

    /// Horizon → local hour-angle/declination matrix.
    pub fn hour_angle_matrix(&self) -> &Matrix3<f64> {
        &self.geometry.hour_angle
    }
}
