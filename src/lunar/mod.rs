//! Vietnamese lunisolar calendar (âm lịch).
//!
//! Months begin on the local date of a new moon. Lunar years are compiled
//! per sui, the span from the month containing one winter solstice (month
//! 11) to the month containing the next; a sui with thirteen lunations gets
//! one leap month, the first month after month 11 that contains no principal
//! term. All of this depends on the timezone: Vietnam uses UTC+7, the Chinese
//! calendar follows the same rules at UTC+8.
//!
//! Astronomical quantities come from the closed-form series in
//! [`ephemeris`]; the supported range is [`SUPPORTED_YEARS`].

use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

use tracing::debug;

use crate::date::Date;
use crate::error::{Error, Result};

pub mod ephemeris;
pub mod fmt;

/// Gregorian years accepted by the converter.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1800..=2199;

/// A date in the lunisolar calendar.
///
/// # Example
///
/// ```
/// use amlich::lunar::{LunarDate, convert_solar_to_lunar};
///
/// let tet = convert_solar_to_lunar(10, 2, 2024, 7).unwrap();
/// assert_eq!(
///     LunarDate { day: 1, month: 1, is_leap_month: false, year: 2024 },
///     tet
/// );
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LunarDate {
    /// Day of the lunar month, `1..=30`
    pub day: u32,
    /// Month number, `1..=12`, the same for a leap month and the month it follows
    pub month: u32,
    /// `true` for an intercalary month
    pub is_leap_month: bool,
    /// Lunar year; months 11 and 12 straddling January keep the previous year
    pub year: i32,
}

impl LunarDate {
    /// Converts `date` using the civil day of the timezone `tz_offset_hours`
    /// ahead of UTC.
    ///
    /// Fails with [`Error::OutOfRange`] outside [`SUPPORTED_YEARS`].
    pub fn from_date(date: Date, tz_offset_hours: i32) -> Result<Self> {
        check_range(date)?;
        let lunar_year = LunarYear::from_date(date, tz_offset_hours)?;
        lunar_year.ymd_for(date).map_err(|other| Error::Inconsistent {
            annus: lunar_year.annus,
            reason: format!("{date} falls {other:?} the year it was located in"),
        })
    }

    /// The month as a [`Month`].
    pub fn month_name(&self) -> Month {
        if self.is_leap_month {
            Month::Leap(self.month)
        } else {
            Month::Common(self.month)
        }
    }

    /// First and fifteenth days of a lunar month are vegetarian days.
    pub fn is_vegetarian_day(&self) -> bool {
        self.day == 1 || self.day == 15
    }
}

impl Display for LunarDate {
    /// Formats as `year-month-day`, with an `L` after a leap month, e.g.
    /// `2025-06L-01`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.is_leap_month { "L" } else { "" };
        write!(f, "{}-{:02}{}-{:02}", self.year, self.month, leap, self.day)
    }
}

/// Converts a Gregorian date into the lunar calendar of the timezone
/// `tz_offset_hours` ahead of UTC (7 for Vietnam).
///
/// Fails with [`Error::InvalidDate`] for a date that does not exist, then
/// with [`Error::OutOfRange`] for a year outside [`SUPPORTED_YEARS`].
///
/// # Example
///
/// ```
/// use amlich::lunar::convert_solar_to_lunar;
///
/// let mid_autumn = convert_solar_to_lunar(6, 10, 2025, 7).unwrap();
/// assert_eq!((15, 8), (mid_autumn.day, mid_autumn.month));
/// assert!(convert_solar_to_lunar(1, 13, 2025, 7).is_err());
/// ```
pub fn convert_solar_to_lunar(
    day: i32,
    month: i32,
    year: i32,
    tz_offset_hours: i32,
) -> Result<LunarDate> {
    let date = Date::from_gregorian(year, month, day)?;
    LunarDate::from_date(date, tz_offset_hours)
}

/// A lunar year (sui): from month 11 containing one winter solstice to the
/// month 11 containing the next.
///
/// # Example
///
/// ```
/// use amlich::lunar::{LunarYear, Month::*};
///
/// let year = LunarYear::new(2025, 7).unwrap();
/// assert_eq!(Some(6), year.leap_month());
/// assert_eq!(Leap(6), year.months[8].month);
/// assert_eq!("2025-07-25", year.months[8].date.iso_gregorian());
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// Gregorian year containing most of the sui
    pub annus: i32,
    /// Timezone the months were computed for
    pub tz_offset_hours: i32,
    /// Every month start, including the next sui's month 11 marking the end
    pub months: Vec<NewMoon>,
}

/// A month start.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    pub date: Date,
}

/// Month name: `Common` for an ordinary month, `Leap` for an intercalary one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Month number, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for `Leap`.
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Vietnamese name, e.g. "tháng Giêng" or "tháng Sáu nhuận".
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

impl LunarYear {
    /// Compiles the sui ending in Gregorian year `annus` for the timezone
    /// `tz_offset_hours` ahead of UTC.
    pub fn new(annus: i32, tz_offset_hours: i32) -> Result<Self> {
        use Month::*;

        if !(*SUPPORTED_YEARS.start()..=*SUPPORTED_YEARS.end() + 1).contains(&annus) {
            return Err(Error::OutOfRange { year: annus });
        }
        let tz = tz_offset_hours * 60;
        let inconsistent = |reason: String| Error::Inconsistent { annus, reason };

        let begin = month_11(annus - 1, tz)?;
        let end = month_11(annus, tz)?;
        let mut new_moon_dates = Vec::with_capacity(14);
        for k in ephemeris::nearest_lunation(begin).. {
            let date = ephemeris::new_moon_date(k, tz);
            new_moon_dates.push(date);
            if date >= end || new_moon_dates.len() > 14 {
                break;
            }
        }
        if new_moon_dates.first() != Some(&begin) || new_moon_dates.last() != Some(&end) {
            return Err(inconsistent(format!(
                "new moons {:?} do not span {begin}..{end}",
                new_moon_dates
            )));
        }
        let mut needs_leap = match new_moon_dates.len() - 1 {
            12 => false,
            13 => true,
            n => return Err(inconsistent(format!("{n} months between winter solstices"))),
        };

        let mut months = Vec::with_capacity(new_moon_dates.len());
        let mut month = 10;
        for (i, &date) in new_moon_dates.iter().enumerate() {
            // no principal term: the sun stays in one sector for the whole month
            if needs_leap
                && i > 0
                && new_moon_dates.get(i + 1).is_some_and(|&next| {
                    ephemeris::principal_term(date, tz) == ephemeris::principal_term(next, tz)
                })
            {
                debug!(annus, tz_offset_hours, leap = month, start = %date, "leap month placed");
                months.push(NewMoon {
                    month: Leap(month),
                    date,
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Common(month),
                date,
            });
        }
        if needs_leap {
            return Err(inconsistent("no month lacks a principal term".to_owned()));
        }

        Ok(LunarYear {
            annus,
            tz_offset_hours,
            months,
        })
    }

    /// Finds the sui containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::lunar::LunarYear;
    ///
    /// let date = Date::from_gregorian(2024, 12, 31).unwrap();
    /// assert_eq!(2025, LunarYear::from_date(date, 7).unwrap().annus);
    /// ```
    pub fn from_date(date: Date, tz_offset_hours: i32) -> Result<Self> {
        let mut y = date.gregorian().0;
        // the sui of year y starts in November or December of y - 1
        for _ in 0..3 {
            let lunar_year = Self::new(y, tz_offset_hours)?;
            match lunar_year.ymd_for(date) {
                Ok(_) => return Ok(lunar_year),
                Err(OtherAnnus::Before) => y -= 1,
                Err(OtherAnnus::After) => y += 1,
            }
        }
        Err(Error::Inconsistent {
            annus: y,
            reason: format!("no sui contains {date}"),
        })
    }

    /// Lunar date of `date` within this sui.
    ///
    /// If `date` is not in this sui, reports whether it lies before or
    /// after.
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherAnnus> {
        let (Some(first), Some(last)) = (self.months.first(), self.months.last()) else {
            return Err(OtherAnnus::Before);
        };
        if date < first.date {
            return Err(OtherAnnus::Before);
        } else if date >= last.date {
            return Err(OtherAnnus::After);
        }

        let m = self.months[self.months.partition_point(|m| m.date <= date) - 1];
        let year = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok(LunarDate {
            day: (date - m.date) as u32 + 1,
            month: m.month.num(),
            is_leap_month: m.month.is_leap(),
            year,
        })
    }

    /// The leap month's number, if this sui has one.
    pub fn leap_month(&self) -> Option<u32> {
        self.months
            .iter()
            .find(|m| m.month.is_leap())
            .map(|m| m.month.num())
    }

    /// Number of months in the sui, 12 or 13.
    pub fn len(&self) -> usize {
        self.months.len().saturating_sub(1)
    }

    /// Always `false` for a compiled sui.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tells a date lies before or after a [`LunarYear`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// The solar term (`0..24`, 0 for Xuân phân, see [`fmt::solar_term`]) in
/// effect at the end of `date`, and whether it begins on that day.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::lunar::{fmt, solar_term_for};
///
/// let date = Date::from_gregorian(2024, 12, 21).unwrap();
/// let (term, begins) = solar_term_for(date, 7).unwrap();
/// assert_eq!(("Đông chí", true), (fmt::solar_term(term), begins));
/// ```
pub fn solar_term_for(date: Date, tz_offset_hours: i32) -> Result<(u32, bool)> {
    check_range(date)?;
    let tz = tz_offset_hours * 60;
    let start = ephemeris::solar_term(date, tz);
    let end = ephemeris::solar_term(date + 1, tz);
    Ok((end, start != end))
}

/// Sexagenary (Can-Chi) number of a lunar year, 1 (Giáp Tý) to 60 (Quý Hợi).
///
/// # Example
///
/// ```
/// use amlich::lunar::sexagenary_for_year;
///
/// assert_eq!(41, sexagenary_for_year(2024)); // Giáp Thìn
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

/// Start of the month containing the winter solstice of Gregorian `year`.
fn month_11(year: i32, tz_offset_minutes: i32) -> Result<Date> {
    let dec31 = Date::from_gregorian(year, 12, 31)?;
    // mean lunations from 1900-01-01 to the end of the year
    let k = ((dec31.jdn() as f64 - 2415021.0) / ephemeris::SYNODIC_MONTH).floor() as i32;
    let new_moon = ephemeris::new_moon_date(k, tz_offset_minutes);
    // sun already past 270°: the solstice fell in the previous month
    if ephemeris::principal_term(new_moon, tz_offset_minutes) >= 9 {
        Ok(ephemeris::new_moon_date(k - 1, tz_offset_minutes))
    } else {
        Ok(new_moon)
    }
}

fn check_range(date: Date) -> Result<()> {
    let year = date.gregorian().0;
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(Error::OutOfRange { year })
    }
}
