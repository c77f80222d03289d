//! Settings owned by the host application.
//!
//! Conversion functions always take the timezone as an argument; this type
//! only gives the host one place to keep the organization's values. Nothing
//! in the crate reads the environment on its own.

use std::env;
use std::fmt::Display;
use std::num::NonZeroUsize;
use std::str::FromStr;

use tracing::{info, warn};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Error, Result};

/// Indochina time, UTC+7.
pub const DEFAULT_TZ_OFFSET_HOURS: i32 = 7;

/// Environment variable read by [`Config::from_env`] for the timezone.
pub const TZ_OFFSET_VAR: &str = "AMLICH_TZ_OFFSET_HOURS";
/// Environment variable read by [`Config::from_env`] for the cache capacity.
pub const CACHE_CAPACITY_VAR: &str = "AMLICH_CACHE_CAPACITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Hours ahead of UTC deciding the civil day of a new moon
    pub tz_offset_hours: i32,
    /// Maximum number of conversions kept by a [`LunarCache`](crate::cache::LunarCache)
    pub cache_capacity: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tz_offset_hours: DEFAULT_TZ_OFFSET_HOURS,
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Loads [`TZ_OFFSET_VAR`] and [`CACHE_CAPACITY_VAR`], falling back to
    /// the defaults for unset variables.
    ///
    /// A variable that is set but unusable is an error rather than a silent
    /// fallback.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            tz_offset_hours: try_load(&lookup, TZ_OFFSET_VAR, defaults.tz_offset_hours)?,
            cache_capacity: try_load(&lookup, CACHE_CAPACITY_VAR, defaults.cache_capacity)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the timezone lies within the offsets in civil use,
    /// `-12..=14`.
    pub fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.tz_offset_hours) {
            return Err(Error::Config {
                key: TZ_OFFSET_VAR,
                reason: format!("{} is not within -12..=14", self.tz_offset_hours),
            });
        }
        Ok(())
    }
}

fn try_load<T>(lookup: impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value {raw:?}: {e}");
        Error::Config {
            key,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(Config::default(), config);
        assert_eq!(7, config.tz_offset_hours);
        assert_eq!(1000, config.cache_capacity.get());
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            (TZ_OFFSET_VAR, "8"),
            (CACHE_CAPACITY_VAR, " 64 "),
        ]))
        .unwrap();
        assert_eq!(8, config.tz_offset_hours);
        assert_eq!(64, config.cache_capacity.get());
    }

    #[test]
    fn rejects_bad_values() {
        for vars in [
            [(TZ_OFFSET_VAR, "seven")],
            [(TZ_OFFSET_VAR, "15")],
            [(CACHE_CAPACITY_VAR, "0")],
            [(CACHE_CAPACITY_VAR, "-1")],
        ] {
            assert!(
                matches!(Config::from_lookup(lookup(&vars)), Err(Error::Config { .. })),
                "{vars:?}"
            );
        }
    }
}
