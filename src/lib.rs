//! Lunar calendar core of the lunch registration service.
//!
//! Converts Gregorian dates into the Vietnamese lunisolar calendar using
//! closed-form astronomical approximations valid for 1800 to 2199, decides
//! which dates are vegetarian days (lunar day 1 or 15), and memoizes
//! conversions for calendar rendering.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use amlich::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Lunar calendar:
//!
//! ```
//! use amlich::{LunarDate, convert_solar_to_lunar};
//!
//! let date = convert_solar_to_lunar(21, 10, 2025, 7).unwrap();
//!
//! assert_eq!(LunarDate { day: 1, month: 9, is_leap_month: false, year: 2025 }, date);
//! assert!(date.is_vegetarian_day());
//! ```
//!
//! Cached lookups while rendering a month:
//!
//! ```
//! use amlich::{Config, LunarCache};
//!
//! let mut cache = LunarCache::from_config(&Config::default());
//! let labels: Vec<_> = (1..=31)
//!     .map(|d| amlich::lunar::fmt::cell_label_or_blank(&cache.get(d, 10, 2025)))
//!     .collect();
//!
//! assert_eq!("15", labels[5]);
//! assert_eq!("1/9", labels[20]);
//! ```
//!
//! The timezone offset is always passed in by the caller: Vietnam uses `7`,
//! and the same rules at `8` give the Chinese calendar.

pub mod cache;
pub mod config;
pub mod date;
pub mod error;
pub mod lunar;
pub mod time_scales;
pub mod vegetarian;

pub use cache::{LunarCache, SharedLunarCache};
pub use config::Config;
pub use date::{Date, YearType};
pub use error::{Error, Result};
pub use lunar::{LunarDate, convert_solar_to_lunar};
pub use vegetarian::{VegetarianDateSet, is_vegetarian_day};
