//! Deals with the two time scales the lunar computation needs: terrestrial
//! time, in which the new-moon series is expressed, and universal time, which
//! decides the civil date.
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// The new-moon series is computed in this time scale, and should be
/// converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point,
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

/// Julian date of 1900 January 0.5, the epoch of the Delta-T polynomial.
const J1900: f64 = 2415020.0;

/// Estimates Delta-T (TT − UT) in days at `tt`.
///
/// Two polynomials in Julian centuries from 1900: one for the far past
/// (before about 800 AD) and one fitted to the modern era. Within the
/// supported range of this crate the error stays well below the margin that
/// could move a new moon across midnight in practice.
pub fn delta_t(tt: Tt) -> f64 {
    let t = (tt.0 - J1900) / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

impl From<Tt> for Ut {
    fn from(tt: Tt) -> Ut {
        Ut(tt.0 - delta_t(tt))
    }
}

impl Ut {
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Indochina time (UTC+7), `tz_offset_minutes` should be +420.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::Ut;
    /// // 2000-01-06T18:14Z
    /// let ut = Ut(2451550.26);
    /// assert_eq!((2000, 1, 6), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2000, 1, 7), ut.date_in_timezone(420).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + 0.5 + tz_offset_minutes as f64 / 1440.0).floor() as u32;
        Date::from_jdn(jdn)
    }

    /// Returns the instant of local midnight starting `date` in the timezone
    /// ahead of UTC by `tz_offset_minutes` minutes.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::time_scales::Ut;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(Ut(2451544.5), Ut::local_midnight(date, 0));
    /// ```
    pub fn local_midnight(date: Date, tz_offset_minutes: i32) -> Self {
        Ut(date.jdn() as f64 - 0.5 - tz_offset_minutes as f64 / 1440.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tt_to_ut() {
        let tt = Tt(2451545.0);
        let ut = Ut::from(tt);
        assert!(ut < Ut(tt.0));
        assert_abs_diff_eq!(21.5, (tt.0 - ut.0) * 86400.0, epsilon = 1.0);
    }

    #[test]
    fn delta_t_in_1900_is_small() {
        assert_abs_diff_eq!(0.0, delta_t(Tt(J1900)) * 86400.0, epsilon = 30.0);
    }

    #[test]
    fn midnight_boundaries() {
        let date = Date::from_gregorian(1999, 12, 31).unwrap();
        let midnight = Ut::local_midnight(date, 480);
        let before = Ut(midnight.0 - 1.0 / 86400.0);
        assert_eq!((1999, 12, 30), before.date_in_timezone(480).gregorian());
        assert_eq!((1999, 12, 31), midnight.date_in_timezone(480).gregorian());
        assert_eq!((1999, 12, 30), midnight.date_in_timezone(0).gregorian());
    }

    #[test]
    fn negative_offsets() {
        let ut = Ut(2451545.1); // 2000-01-01T14:24Z
        assert_eq!((2000, 1, 1), ut.date_in_timezone(-300).gregorian());
        assert_eq!((2000, 1, 1), ut.date_in_timezone(540).gregorian());
        assert_eq!((2000, 1, 2), ut.date_in_timezone(600).gregorian());
    }
}
