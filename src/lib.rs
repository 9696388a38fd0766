/*-------------------------- In the name of God ----------------------------*\

    salah_times (rust)
    Islamic prayer times calculator library
    Based on libprayertimes 1.0 Cpp library
    Based on PrayTimes 1.1 JavaScript library

----------------------------- Copyright Block --------------------------------

Copyright (C) 2007-2010 PrayTimes.org

Based on Rust Code By: Nbiba Bedis <bedis at nbiba at gmail dot com>
Based on Cpp Code By: Mohammad Ebrahim Mohammadi Panah <ebrahim at mohammadi dot ir>
Based on a JavaScript Code By: Hamid Zarrabi-Zadeh

License: GNU GPL v3.0

TERMS OF USE:
    Permission is granted to use this code, with or
    without modification, in any website or application
    provided that credit is given to the original work
    with a link back to PrayTimes.org.

This program is distributed in the hope that it will
be useful, but WITHOUT ANY WARRANTY.

PLEASE DO NOT REMOVE THIS COPYRIGHT BLOCK.

------------------------------------------------------------------------------

User's Manual:
http://praytimes.org/manual

Calculating Formulas:
http://praytimes.org/calculation

\*--------------------------------------------------------------------------*/

//! Offline prayer time calculation.
//!
//! Every function in this crate is a pure function of its arguments: the
//! only shared data is the read-only table of calculation methods.
//!
//! ```
//! use chrono::NaiveDate;
//! use salah_times::{compute_prayer_times, CalculationMethod, GeoCoordinate};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let makkah = GeoCoordinate::new(21.4225, 39.8262);
//! let times = compute_prayer_times(date, makkah, CalculationMethod::ISNA, 3.0);
//! assert_eq!(times.dhuhr.to_string(), "12:30");
//! ```

use std::f64::consts::PI;

use chrono::{Datelike, FixedOffset, Local, NaiveDate, Offset, TimeZone};

pub mod countdown;
pub mod error;
pub mod hijri;
pub mod method;
pub mod settings;
pub mod times;

pub use countdown::{countdown, get_countdown, next_prayer, parse_to_instant, NextPrayer};
pub use error::{Error, Result};
pub use hijri::{get_hijri_date, HijriDate};
pub use method::{CalculationMethod, MethodConfig};
pub use settings::Settings;
pub use times::{float_time_to_time24, ClockTime, PrayerTime, PrayerTimeSet, TimeId};

/// Depression of the sun's centre at sunrise and sunset: refraction plus the
/// apparent solar radius.
pub const SUNRISE_ANGLE: f64 = 0.833;

/// Shadow length factor for Asr (Shafi'i: shadow equals object length).
const ASR_SHADOW_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Declination in degrees.
    pub declination: f64,
    /// Equation of time in hours.
    pub equation_of_time: f64,
}

/// Event times in fractional local hours, before wrapping into a day.
///
/// `None` marks an event whose angle the sun does not reach that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTimes {
    pub fajr: Option<f64>,
    pub sunrise: Option<f64>,
    pub dhuhr: f64,
    pub asr: Option<f64>,
    pub sunset: Option<f64>,
    pub isha: Option<f64>,
}

/// Computes the day's schedule for `date` at `coords`.
///
/// `timezone` is the UTC offset in hours that the returned wall-clock times
/// are expressed in.
pub fn compute_prayer_times(
    date: NaiveDate,
    coords: GeoCoordinate,
    method: CalculationMethod,
    timezone: f64,
) -> PrayerTimeSet {
    let raw = compute_raw_times(date, coords, method, timezone);
    PrayerTimeSet {
        fajr: PrayerTime::from_solution(raw.fajr),
        sunrise: PrayerTime::from_solution(raw.sunrise),
        dhuhr: PrayerTime::from_hours(raw.dhuhr),
        asr: PrayerTime::from_solution(raw.asr),
        maghrib: PrayerTime::from_solution(raw.sunset),
        isha: PrayerTime::from_solution(raw.isha),
    }
}

/// Like [`compute_prayer_times`], using the device's UTC offset on `date`.
pub fn compute_prayer_times_local(
    date: NaiveDate,
    coords: GeoCoordinate,
    method: CalculationMethod,
) -> PrayerTimeSet {
    compute_prayer_times(date, coords, method, local_offset_hours(date))
}

/// UTC offset of the local timezone at noon on `date`, in hours.
pub fn local_offset_hours(date: NaiveDate) -> f64 {
    let offset = date
        .and_hms_opt(12, 0, 0)
        .and_then(|noon| Local.from_local_datetime(&noon).earliest())
        .map(|noon| noon.offset().fix())
        .unwrap_or_else(|| Local::now().offset().fix());
    offset_hours(&offset)
}

pub fn offset_hours(offset: &FixedOffset) -> f64 {
    offset.local_minus_utc() as f64 / 3600.0
}

pub fn compute_raw_times(
    date: NaiveDate,
    coords: GeoCoordinate,
    method: CalculationMethod,
    timezone: f64,
) -> RawTimes {
    let GeoCoordinate {
        latitude,
        longitude,
    } = coords;
    log::debug!(
        "computing times for {} at ({}, {}), method {}, timezone {:+}",
        date,
        latitude,
        longitude,
        method,
        timezone
    );

    let julian_date =
        get_julian_date(date.year(), date.month(), date.day()) - longitude / (15. * 24.);
    let sun = sun_position(julian_date + 1.0);
    log::trace!("solar position for jd {}: {:?}", julian_date, sun);

    let dhuhr = compute_mid_day(sun.equation_of_time) + timezone - longitude / 15.0;
    let before = |angle: f64| hour_angle(angle, latitude, sun.declination).map(|t| dhuhr - t);
    let after = |angle: f64| hour_angle(angle, latitude, sun.declination).map(|t| dhuhr + t);

    let params = method.config();
    let sunrise = before(SUNRISE_ANGLE);
    let sunset = after(SUNRISE_ANGLE);
    let fajr = before(params.fajr_angle);
    let asr = compute_asr(ASR_SHADOW_FACTOR, latitude, sun.declination).map(|t| dhuhr + t);
    let isha = if params.isha_is_minutes() {
        sunset.map(|t| t + params.isha_minutes / 60.0)
    } else {
        after(params.isha_angle)
    };

    RawTimes {
        fajr,
        sunrise,
        dhuhr,
        asr,
        sunset,
        isha,
    }
}

/* ---------------------- Compute Prayer Times ----------------------- */

/// Hours between solar noon and the moment the sun is `angle` degrees below
/// the horizon (negative angles are above it).
///
/// Returns `None` when the sun never reaches that angle on this day.
pub fn hour_angle(angle: f64, latitude: f64, declination: f64) -> Option<f64> {
    let cos_ha = (-dsin(angle) - dsin(latitude) * dsin(declination))
        / (dcos(latitude) * dcos(declination));
    if !(-1.0..=1.0).contains(&cos_ha) {
        log::debug!(
            "sun does not reach {}° below the horizon at latitude {} (declination {:.3})",
            angle,
            latitude,
            declination
        );
        return None;
    }
    Some(darccos(cos_ha) / 15.0)
}

/* compute the hours from noon to Asr; Shafii: factor=1, Hanafi: factor=2 */
fn compute_asr(factor: f64, latitude: f64, declination: f64) -> Option<f64> {
    let altitude = darccot(factor + dtan(f64::abs(latitude - declination)));
    hour_angle(-altitude, latitude, declination)
}

/* compute mid-day (Dhuhr, Zawal) time */
fn compute_mid_day(equation_of_time: f64) -> f64 {
    fix_hour(12. - equation_of_time)
}

/// Julian Day at 0h UT of a proleptic Gregorian date.
pub fn get_julian_date(mut year: i32, mut month: u32, day: u32) -> f64 {
    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let a = (year as f64 / 100.).floor();
    let b = 2. - a + (a / 4.).floor();

    (365.25 * (year as f64 + 4716.)).floor()
        + (30.6001 * (month as f64 + 1.)).floor()
        + day as f64
        + b
        - 1524.5
}

/* compute declination angle of sun and equation of time */
pub fn sun_position(jd: f64) -> SolarPosition {
    let d = jd - 2451545.0;
    let g = fix_angle(357.529 + 0.98560028 * d);
    let q = fix_angle(280.459 + 0.98564736 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2. * g));

    let e = 23.439 - 0.00000036 * d;

    let declination = darcsin(dsin(e) * dsin(l));
    let ra = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);

    SolarPosition {
        declination,
        equation_of_time: q / 15.0 - ra,
    }
}

/* ---------------------- Trigonometric Functions ----------------------- */

/* degree sin */
fn dsin(d: f64) -> f64 {
    deg2rad(d).sin()
}

/* degree cos */
fn dcos(d: f64) -> f64 {
    deg2rad(d).cos()
}

/* degree tan */
fn dtan(d: f64) -> f64 {
    deg2rad(d).tan()
}

/* degree arcsin */
fn darcsin(x: f64) -> f64 {
    rad2deg(x.asin())
}

/* degree arccos */
fn darccos(x: f64) -> f64 {
    rad2deg(x.acos())
}

/* degree arctan2 */
fn darctan2(y: f64, x: f64) -> f64 {
    rad2deg(y.atan2(x))
}

/* degree arccot */
fn darccot(x: f64) -> f64 {
    rad2deg((1.0 / x).atan())
}

/* degree to radian */
pub fn deg2rad(d: f64) -> f64 {
    d * PI / 180.0
}

/* radian to degree */
pub fn rad2deg(r: f64) -> f64 {
    r * 180.0 / PI
}

/* range reduce angle in degrees. */
pub fn fix_angle(mut a: f64) -> f64 {
    a = a - 360.0 * (a / 360.0).floor();
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/* range reduce hours to 0..23 */
pub fn fix_hour(mut a: f64) -> f64 {
    a = a - 24.0 * (a / 24.0).floor();
    if a < 0.0 {
        a + 24.0
    } else {
        a
    }
}
