//! Cache configuration.

use crate::error::FastCacheError;

/// Default spacing between exact samples: 12 hours.
pub const DEFAULT_WINDOW_MINUTES: f64 = 720.0;
/// Longest accepted spacing: one week.
pub const MAX_WINDOW_MINUTES: f64 = 10_080.0;

/// What `get_approx` does for a query beyond the cached samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StalePolicy {
    /// Fail with `FastCacheError::Stale`.
    #[default]
    RequireRefresh,
    /// Extrapolate linearly up to `max_windows` window lengths past the
    /// samples, flagging the result and widening its error bound.
    Extrapolate { max_windows: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastCacheConfig {
    /// Spacing between exact samples, minutes.
    pub window_minutes: f64,
    pub stale_policy: StalePolicy,
}

impl Default for FastCacheConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl FastCacheConfig {
    pub fn with_window_minutes(window_minutes: f64) -> Self {
        Self {
            window_minutes,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), FastCacheError> {
        let w = self.window_minutes;
        if !(w.is_finite() && w > 0.0 && w <= MAX_WINDOW_MINUTES) {
            return Err(FastCacheError::InvalidConfig {
                field: "window_minutes",
                value: w,
            });
        }
        if let StalePolicy::Extrapolate { max_windows } = self.stale_policy {
            if !(max_windows.is_finite() && max_windows >= 0.0) {
                return Err(FastCacheError::InvalidConfig {
                    field: "max_windows",
                    value: max_windows,
                });
            }
        }
        Ok(())
    }

    /// Sample spacing in days.
    pub fn window_days(&self) -> f64 {
        self.window_minutes / 1440.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_half_a_day_requiring_refresh() {
        let c = FastCacheConfig::default();
        assert_eq!(c.window_minutes, 720.0);
        assert_eq!(c.stale_policy, StalePolicy::RequireRefresh);
        assert!((c.window_days() - 0.5).abs() < 1e-15);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_windows() {
        for w in [0.0, -5.0, 20_000.0, f64::NAN] {
            let err = FastCacheConfig::with_window_minutes(w).validate().unwrap_err();
            assert!(matches!(err, FastCacheError::InvalidConfig { field: "window_minutes", .. }));
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn rejects_bad_extrapolation_limit() {
        let c = FastCacheConfig {
            stale_policy: StalePolicy::Extrapolate {
                max_windows: f64::INFINITY,
            },
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
