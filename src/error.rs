//! Error type shared by every module of the crate.

use thiserror::Error;

use crate::date::Date;

/// Errors produced by date construction, lunar conversion and the
/// vegetarian-day rules.
///
/// None of these are transient: retrying with the same input yields the same
/// error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The Gregorian date does not exist (e.g. month 13 or February 30).
    #[error("invalid Gregorian date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    /// The year lies outside [`SUPPORTED_YEARS`](crate::lunar::SUPPORTED_YEARS).
    #[error("year {year} is outside the supported range 1800..=2199")]
    OutOfRange { year: i32 },

    /// Text that is not a `YYYY-MM-DD` date key.
    #[error("malformed date key {0:?}, expected YYYY-MM-DD")]
    InvalidDateKey(String),

    /// A date was offered as a vegetarian day although its lunar day is
    /// neither 1 nor 15.
    #[error("{0} is not a vegetarian day")]
    NotVegetarianDay(Date),

    /// The month bookkeeping of a lunar year does not add up.
    #[error("inconsistent lunar year {annus}: {reason}")]
    Inconsistent { annus: i32, reason: String },

    /// A configuration value could not be used.
    #[error("invalid configuration value for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

/// Shorthand `Result` used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::InvalidDate {
            year: 2024,
            month: 13,
            day: 1,
        };
        assert_eq!("invalid Gregorian date 2024-13-01", e.to_string());
        assert_eq!(
            "year 1000 is outside the supported range 1800..=2199",
            Error::OutOfRange { year: 1000 }.to_string()
        );
    }

    #[test]
    fn distinguishable() {
        assert_ne!(
            Error::OutOfRange { year: 9999 },
            Error::InvalidDate {
                year: 9999,
                month: 1,
                day: 1
            }
        );
    }
}
