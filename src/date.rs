//! Calendar-independent date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A calendar-independent date, stored as its Julian day number.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
/// The text form is the ISO `YYYY-MM-DD` Gregorian date, which is also the
/// key format used for registration rows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Fails with [`Error::InvalidDate`] if the month or day does not exist,
    /// and with [`Error::OutOfRange`] if the date precedes JDN 0.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2023, 2, 29).is_err());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Result<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(Error::InvalidDate { year, month, day });
        }
        let (y, m, d) = (year as i64, month as i64, day as i64);
        let jdn = (1461 * (y + 4800 + (m - 14) / 12)) / 4
            + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075;
        u32::try_from(jdn)
            .map(Self::from_jdn)
            .map_err(|_| Error::OutOfRange { year })
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }
    /// Returns `true` on Saturdays and Sundays.
    pub fn is_weekend(&self) -> bool {
        self.day_of_week() >= 6
    }
    /// Returns the sexagenary (Can-Chi) day number of the date, numbered
    /// from 1 (Giáp Tý) to 60 (Quý Hợi).
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // Mậu Ngọ
    /// ```
    pub fn sexagenary(&self) -> i32 {
        ((self.jdn + 49) % 60 + 1) as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses a strict `YYYY-MM-DD` key.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::InvalidDateKey(s.to_owned());
        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let digits = |part: &str, len: usize| {
            if part.len() == len && part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse::<i32>().map_err(|_| malformed())
            } else {
                Err(malformed())
            }
        };
        Date::from_gregorian(digits(y, 4)?, digits(m, 2)?, digits(d, 2)?)
    }
}

impl TryFrom<String> for Date {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.iso_gregorian()
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` for a month outside `1..=12`.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(1800, 1, 1).unwrap();
        assert_eq!(2378497, date.jdn());
    }

    #[test]
    fn rejects_malformed() {
        for (y, m, d) in [
            (2024, 13, 1),
            (2024, 0, 10),
            (2024, 4, 31),
            (2023, 2, 29),
            (1900, 2, 29),
            (2024, 1, 0),
        ] {
            assert_eq!(
                Err(Error::InvalidDate {
                    year: y,
                    month: m,
                    day: d
                }),
                Date::from_gregorian(y, m, d)
            );
        }
        assert!(Date::from_gregorian(2000, 2, 29).is_ok());
        assert_eq!(
            Err(Error::OutOfRange { year: -5000 }),
            Date::from_gregorian(-5000, 1, 1)
        );
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
        assert!(Date::from_gregorian(2025, 10, 5).unwrap().is_weekend());
        assert!(!Date::from_gregorian(2025, 10, 6).unwrap().is_weekend());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        assert_eq!(
            "2025-10-06",
            Date::from_gregorian(2025, 10, 6).unwrap().to_string()
        );
    }

    #[test]
    fn parse_keys() {
        assert_eq!(
            Ok(Date::from_gregorian(2025, 10, 21).unwrap()),
            "2025-10-21".parse::<Date>()
        );
        for bad in ["2025-1-21", "20251021", "2025-10-21-", "2025/10/21", "", "+025-10-21"] {
            assert_eq!(
                Err(Error::InvalidDateKey(bad.to_owned())),
                bad.parse::<Date>(),
                "{bad:?}"
            );
        }
        assert!(matches!(
            "2025-02-30".parse::<Date>(),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2024, 2, 28).unwrap();
        assert_eq!("2024-03-01", (date + 2).iso_gregorian());
        assert_eq!("2024-02-27", (date + -1).iso_gregorian());
        assert_eq!(2, (date + 2) - date);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(29, days_in_month(2024, 2));
        assert_eq!(28, days_in_month(2100, 2));
        assert_eq!(30, days_in_month(2025, 9));
        assert_eq!(0, days_in_month(2025, 13));
    }
}
