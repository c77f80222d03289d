//! Vegetarian days: the first and fifteenth days of every lunar month.
//!
//! The same predicate gates the calendar toggle, the bulk admin checkbox and
//! the server-side validation of submitted registrations, so every surface
//! goes through [`is_vegetarian_day`] (or [`LunarDate::is_vegetarian_day`]
//! when a lunar date is already at hand).

use std::collections::BTreeSet;

use tracing::debug;

use crate::date::Date;
use crate::error::{Error, Result};
use crate::lunar::LunarDate;

/// `true` if `date` falls on lunar day 1 or 15 in the timezone
/// `tz_offset_hours` ahead of UTC.
///
/// Conversion errors propagate; an unconvertible date is never reported as
/// an ordinary non-vegetarian day.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::vegetarian::is_vegetarian_day;
///
/// let date = Date::from_gregorian(2025, 10, 6).unwrap();
/// assert_eq!(Ok(true), is_vegetarian_day(date, 7));
/// ```
pub fn is_vegetarian_day(date: Date, tz_offset_hours: i32) -> Result<bool> {
    LunarDate::from_date(date, tz_offset_hours).map(|lunar| lunar.is_vegetarian_day())
}

/// Vegetarian days in `from..=to`, for bulk registration over a date range.
///
/// Yields an error for each date that cannot be converted.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::vegetarian::vegetarian_days;
///
/// let from = Date::from_gregorian(2025, 10, 1).unwrap();
/// let to = Date::from_gregorian(2025, 10, 31).unwrap();
/// let days: Vec<_> = vegetarian_days(from, to, 7)
///     .map(|d| d.unwrap().iso_gregorian())
///     .collect();
/// assert_eq!(vec!["2025-10-06", "2025-10-21"], days);
/// ```
pub fn vegetarian_days(from: Date, to: Date, tz_offset_hours: i32) -> VegetarianDays {
    VegetarianDays {
        next: from,
        to,
        tz_offset_hours,
    }
}

/// Iterator returned by [`vegetarian_days`].
#[derive(Debug, Clone)]
pub struct VegetarianDays {
    next: Date,
    to: Date,
    tz_offset_hours: i32,
}

impl Iterator for VegetarianDays {
    type Item = Result<Date>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next <= self.to {
            let date = self.next;
            self.next = date + 1;
            match is_vegetarian_day(date, self.tz_offset_hours) {
                Ok(true) => return Some(Ok(date)),
                Ok(false) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// The dates one employee has flagged as vegetarian meal days.
///
/// Every member is a vegetarian day for the set's timezone: [`insert`]
/// refuses anything else and [`sanitize`] drops it.
///
/// [`insert`]: VegetarianDateSet::insert
/// [`sanitize`]: VegetarianDateSet::sanitize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VegetarianDateSet {
    tz_offset_hours: i32,
    dates: BTreeSet<Date>,
}

impl VegetarianDateSet {
    /// An empty set for the timezone `tz_offset_hours` ahead of UTC.
    pub fn new(tz_offset_hours: i32) -> Self {
        Self {
            tz_offset_hours,
            dates: BTreeSet::new(),
        }
    }

    /// Builds a set from client-submitted `YYYY-MM-DD` keys, silently
    /// dropping every key that is malformed, outside the supported range or
    /// not a vegetarian day.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::vegetarian::VegetarianDateSet;
    ///
    /// let set = VegetarianDateSet::sanitize(["2025-10-06", "2025-10-07", "junk"], 7);
    /// assert_eq!(vec!["2025-10-06"], set.keys().collect::<Vec<_>>());
    /// ```
    pub fn sanitize<I, S>(keys: I, tz_offset_hours: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(tz_offset_hours);
        for key in keys {
            let key = key.as_ref();
            if let Err(e) = key.parse::<Date>().and_then(|date| set.insert(date)) {
                debug!(key, "dropping vegetarian day candidate: {e}");
            }
        }
        set
    }

    /// Adds `date`, returning whether it was newly inserted.
    ///
    /// Fails with [`Error::NotVegetarianDay`] if `date` is not a vegetarian
    /// day, or with the conversion error if it cannot be checked.
    pub fn insert(&mut self, date: Date) -> Result<bool> {
        if is_vegetarian_day(date, self.tz_offset_hours)? {
            Ok(self.dates.insert(date))
        } else {
            Err(Error::NotVegetarianDay(date))
        }
    }

    /// Removes `date`, returning whether it was present.
    pub fn remove(&mut self, date: Date) -> bool {
        self.dates.remove(&date)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Member dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Member dates as `YYYY-MM-DD` keys, ascending.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|date| date.iso_gregorian())
    }
}
