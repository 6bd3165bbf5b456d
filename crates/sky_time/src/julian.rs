//! Day-count epochs relative to J2000.0.
//!
//! The continuous time coordinate used across the workspace is days since
//! J2000.0 (2000-01-01 12:00 in the relevant time scale). Civil-date
//! arithmetic uses Howard Hinnant's proleptic Gregorian algorithms, exact for
//! any `i64` day number.

/// Julian Date of J2000.0.
pub const J2000_JD: f64 = 2_451_545.0;
/// Modified Julian Date of J2000.0.
pub const J2000_MJD: f64 = 51_544.5;
/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Days in one Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Days in one Julian year.
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
/// Days from 1970-01-01 to 2000-01-01.
const UNIX_DAYS_TO_2000: i64 = 10_957;

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1–12) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian `(year, month, day)` for days since 1970-01-01.
pub fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month as u32, day as u32)
}

/// Days since J2000.0 for a civil date and time of day in seconds.
pub fn civil_to_j2k_days(year: i32, month: u32, day: u32, seconds_of_day: f64) -> f64 {
    let whole = days_from_civil(year, month, day) - UNIX_DAYS_TO_2000;
    (whole as f64 - 0.5) + seconds_of_day / SECONDS_PER_DAY
}

/// Civil date and seconds of day for days since J2000.0.
pub fn j2k_days_to_civil(days: f64) -> (i32, u32, u32, f64) {
    let from_midnight = days + 0.5;
    let mut whole = from_midnight.floor();
    let mut seconds = ((from_midnight - whole) * SECONDS_PER_DAY).max(0.0);
    // A fraction a hair below 1 can round up to a full day.
    if seconds >= SECONDS_PER_DAY {
        whole += 1.0;
        seconds = 0.0;
    }
    let (y, m, d) = civil_from_days(whole as i64 + UNIX_DAYS_TO_2000);
    (y, m, d, seconds)
}

/// Convert Unix seconds to days since J2000.0 (same time scale, UTC).
pub fn unix_to_j2k_days(unix_seconds: f64) -> f64 {
    unix_seconds / SECONDS_PER_DAY - (UNIX_DAYS_TO_2000 as f64 + 0.5)
}

/// Convert days since J2000.0 back to Unix seconds.
pub fn j2k_days_to_unix(days: f64) -> f64 {
    (days + UNIX_DAYS_TO_2000 as f64 + 0.5) * SECONDS_PER_DAY
}

/// Julian Date → days since J2000.0.
pub fn jd_to_j2k_days(jd: f64) -> f64 {
    jd - J2000_JD
}

/// Modified Julian Date → days since J2000.0.
pub fn mjd_to_j2k_days(mjd: f64) -> f64 {
    mjd - J2000_MJD
}

/// Days since J2000.0 → Modified Julian Date.
pub fn j2k_days_to_mjd(days: f64) -> f64 {
    days + J2000_MJD
}

/// Julian epoch (e.g. 2000.0, J2015.5) → days since J2000.0.
pub fn julian_epoch_to_j2k_days(year: f64) -> f64 {
    (year - 2000.0) * DAYS_PER_JULIAN_YEAR
}

/// Besselian epoch (e.g. B1950.0) → days since J2000.0.
pub fn besselian_epoch_to_j2k_days(year: f64) -> f64 {
    2_415_020.313_52 + (year - 1900.0) * 365.242_198_781 - J2000_JD
}

/// Days since J2000.0 → Julian centuries.
pub fn j2k_days_to_centuries(days: f64) -> f64 {
    days / DAYS_PER_JULIAN_CENTURY
}
