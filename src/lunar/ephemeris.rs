//! Closed-form approximations of new moons and of the sun's apparent
//! longitude.
//!
//! The new-moon series is a truncated lunar theory in the manner of Meeus,
//! counted in lunations `k` since the new moon of 1900-01-01; the sun's
//! longitude uses the equation of centre up to the third harmonic. Both are
//! accurate to minutes over 1800..=2199, which is what the month and
//! principal-term bookkeeping needs.

use std::f64::consts::PI;

use crate::date::Date;
use crate::time_scales::{Tt, Ut};

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Julian date of new moon `k = 0` (1900-01-01).
pub const NEW_MOON_EPOCH: f64 = 2415021.076998695;

const DR: f64 = PI / 180.0;

/// Time of the `k`-th new moon after 1900-01-01, in terrestrial time.
///
/// # Example
///
/// ```
/// use amlich::lunar::ephemeris;
///
/// // 2000-01-06T18:14Z
/// let tt = ephemeris::new_moon(1237);
/// assert!((tt.0 - 2451550.26).abs() < 0.01);
/// ```
pub fn new_moon(k: i32) -> Tt {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * DR).sin();
    // sun's mean anomaly, moon's mean anomaly, moon's argument of latitude
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;
    let mut c1 = (0.1734 - 0.000393 * t) * (m * DR).sin() + 0.0021 * (2.0 * DR * m).sin();
    c1 = c1 - 0.4068 * (mpr * DR).sin() + 0.0161 * (DR * 2.0 * mpr).sin();
    c1 -= 0.0004 * (DR * 3.0 * mpr).sin();
    c1 = c1 + 0.0104 * (DR * 2.0 * f).sin() - 0.0051 * (DR * (m + mpr)).sin();
    c1 = c1 - 0.0074 * (DR * (m - mpr)).sin() + 0.0004 * (DR * (2.0 * f + m)).sin();
    c1 = c1 - 0.0004 * (DR * (2.0 * f - m)).sin() - 0.0006 * (DR * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.0010 * (DR * (2.0 * f - mpr)).sin() + 0.0005 * (DR * (2.0 * mpr + m)).sin();
    Tt(jd1 + c1)
}

/// Local date of the `k`-th new moon in the timezone ahead of UTC by
/// `tz_offset_minutes` minutes.
pub fn new_moon_date(k: i32, tz_offset_minutes: i32) -> Date {
    Ut::from(new_moon(k)).date_in_timezone(tz_offset_minutes)
}

/// Index of the lunation whose mean new moon is nearest to `date`.
pub fn nearest_lunation(date: Date) -> i32 {
    ((date.jdn() as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH).round() as i32
}

/// Apparent longitude of the sun at `ut`, in radians within `[0, 2π)`.
pub fn sun_longitude(ut: Ut) -> f64 {
    let t = (ut.0 - 2451545.0) / 36525.0;
    let t2 = t * t;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let mut dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (DR * m).sin();
    dl = dl + (0.019993 - 0.000101 * t) * (DR * 2.0 * m).sin() + 0.000290 * (DR * 3.0 * m).sin();
    let l = (l0 + dl) * DR;
    l - PI * 2.0 * (l / (PI * 2.0)).floor()
}

/// The 30° sector (`0..12`, 0 starting at the vernal equinox) of the sun's
/// longitude at local midnight starting `date`.
///
/// A lunar month whose first day and the next month's first day share the
/// same sector contains no principal term.
pub fn principal_term(date: Date, tz_offset_minutes: i32) -> u32 {
    let l = sun_longitude(Ut::local_midnight(date, tz_offset_minutes));
    (l / PI * 6.0).floor() as u32
}

/// The 15° sector (`0..24`, 0 for Xuân phân) of the sun's longitude at local
/// midnight starting `date`.
pub fn solar_term(date: Date, tz_offset_minutes: i32) -> u32 {
    let l = sun_longitude(Ut::local_midnight(date, tz_offset_minutes));
    (l / PI * 12.0).floor() as u32
}
