//! Calendar ring arithmetic
//!
//! The date scale on the wheel is laid out for a fixed reference year. Each
//! date sits at the angle of the sky's rotation at local midnight, measured
//! from the March equinox of that year.

use chrono::{NaiveDate, NaiveDateTime};
use std::f64::consts::PI;

use super::UNIT_REV;

/// Year the calendar ring is computed for (not a leap year)
pub const REFERENCE_YEAR: i32 = 2014;

/// Julian day of the March equinox of [`REFERENCE_YEAR`] (2014-03-20 16:55 UT)
pub const MARCH_EQUINOX_2014_JD: f64 = 2_456_737.204_861_111;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub name: &'static str,
    pub days: u32,
}

pub const MONTHS: [Month; 12] = [
    Month { name: "January", days: 31 },
    Month { name: "February", days: 28 },
    Month { name: "March", days: 31 },
    Month { name: "April", days: 30 },
    Month { name: "May", days: 31 },
    Month { name: "June", days: 30 },
    Month { name: "July", days: 31 },
    Month { name: "August", days: 31 },
    Month { name: "September", days: 30 },
    Month { name: "October", days: 31 },
    Month { name: "November", days: 30 },
    Month { name: "December", days: 31 },
];

/// Julian day of a UT date and time
pub fn julian_day(datetime: NaiveDateTime) -> f64 {
    let utc = datetime.and_utc();
    utc.timestamp() as f64 / 86_400.0
        + f64::from(utc.timestamp_subsec_millis()) / 86_400_000.0
        + UNIX_EPOCH_JD
}

/// Rotation of the sky at local midnight relative to the March equinox,
/// in radians. One full turn per year.
pub fn sky_rotation(jd: f64) -> f64 {
    (jd - MARCH_EQUINOX_2014_JD) / 365.25 * UNIT_REV
}

/// A date and hour in the reference year; `None` for dates that don't exist
pub fn reference_datetime(month: u32, day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)?.and_hms_opt(hour, 0, 0)
}

/// Local sidereal time at local midnight, in radians, for a date (and hour,
/// for marks that sit part way through a day) in the reference year. At the
/// March equinox the Sun is at RA 0h, so midnight looks out towards 12h.
pub fn midnight_sidereal_angle(month: u32, day: u32, hour: u32) -> Option<f64> {
    let jd = julian_day(reference_datetime(month, day, hour)?);
    Some(PI + sky_rotation(jd))
}
