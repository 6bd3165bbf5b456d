//! Error types for time construction.

use thiserror::Error;

/// Calendar field rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Errors from calendar validation or time-scale setup.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is outside its valid range.
    #[error("invalid calendar {field:?}: {value}")]
    InvalidCalendar { field: CalendarField, value: f64 },
    /// Timezone offset outside [−14, 14] hours or not finite.
    #[error("invalid timezone offset: {0} h")]
    InvalidTimezone(f64),
    /// UT1−UTC or TT−UTC offset not finite or out of range.
    #[error("invalid time-scale offset {name}: {value} s")]
    InvalidOffset { name: &'static str, value: f64 },
    /// A non-finite epoch reached a time constructor.
    #[error("non-finite epoch: {0}")]
    NonFinite(f64),
}
