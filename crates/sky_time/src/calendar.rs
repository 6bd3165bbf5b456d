//! Civil calendar date/time with sub-second precision.

use crate::error::{CalendarField, TimeError};
use crate::julian::{civil_to_j2k_days, days_in_month, j2k_days_to_civil};

/// Largest accepted timezone offset magnitude, hours.
pub const MAX_TIMEZONE_HOURS: f64 = 14.0;

/// Calendar date and local time of day.
///
/// Seconds lie in [0, 60): without a leap-second table a 60th second would
/// alias the first second of the next minute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Reject out-of-range fields.
    pub fn validate(&self) -> Result<(), TimeError> {
        let bad = |field, value: f64| Err(TimeError::InvalidCalendar { field, value });
        if !(1..=12).contains(&self.month) {
            return bad(CalendarField::Month, f64::from(self.month));
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return bad(CalendarField::Day, f64::from(self.day));
        }
        if self.hour > 23 {
            return bad(CalendarField::Hour, f64::from(self.hour));
        }
        if self.minute > 59 {
            return bad(CalendarField::Minute, f64::from(self.minute));
        }
        if !(self.second.is_finite() && (0.0..60.0).contains(&self.second)) {
            return bad(CalendarField::Second, self.second);
        }
        Ok(())
    }

    /// Days since J2000.0 in UTC, given the zone offset (hours east of UTC)
    /// the fields are expressed in.
    pub fn to_j2k_days(&self, tz_hours: f64) -> Result<f64, TimeError> {
        self.validate()?;
        validate_timezone(tz_hours)?;
        let seconds =
            f64::from(self.hour) * 3600.0 + f64::from(self.minute) * 60.0 + self.second
                - tz_hours * 3600.0;
        Ok(civil_to_j2k_days(self.year, self.month, self.day, seconds))
    }

    /// Calendar fields for a UTC day count, shifted into the given zone.
    pub fn from_j2k_days(days: f64, tz_hours: f64) -> Self {
        let (year, month, day, sod) = j2k_days_to_civil(days + tz_hours / 24.0);
        let (hour, rest) = split_unit(sod, 3600.0, 23);
        let (minute, second) = split_unit(rest, 60.0, 59);
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Whole units in `value` (at most `max`) and the remainder, correcting a
/// quotient that rounded up past `value`.
fn split_unit(value: f64, unit: f64, max: u32) -> (u32, f64) {
    let mut n = ((value / unit).floor().max(0.0) as u32).min(max);
    if n > 0 && f64::from(n) * unit > value {
        n -= 1;
    }
    (n, value - f64::from(n) * unit)
}

/// Reject non-finite or implausible zone offsets.
pub fn validate_timezone(tz_hours: f64) -> Result<(), TimeError> {
    if tz_hours.is_finite() && tz_hours.abs() <= MAX_TIMEZONE_HOURS {
        Ok(())
    } else {
        Err(TimeError::InvalidTimezone(tz_hours))
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
