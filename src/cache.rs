//! Memoization of lunar conversions for calendar rendering.
//!
//! A month grid asks for the same 30 to 42 dates on every render. The cache
//! is keyed by the Gregorian date and bounded by a fixed capacity; when full,
//! the entry inserted first is evicted (FIFO, lookups do not refresh an
//! entry). Conversion is a pure function, so entries never go stale. Errors
//! are returned to the caller and never stored.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::num::NonZeroUsize;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::Config;
use crate::date::Date;
use crate::error::Result;
use crate::lunar::LunarDate;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Cache key: a Gregorian `(year, month, day)`, displayed as `YYYY-MM-DD`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CacheKey {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl CacheKey {
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Self { year, month, day }
    }
}

impl From<Date> for CacheKey {
    fn from(date: Date) -> Self {
        let (year, month, day) = date.gregorian();
        Self { year, month, day }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Bounded FIFO cache of lunar conversions for one timezone.
///
/// Needs `&mut self`; share it between threads through
/// [`SharedLunarCache`].
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use amlich::cache::LunarCache;
///
/// let mut cache = LunarCache::new(NonZeroUsize::new(64).unwrap(), 7);
/// let lunar = cache.get(6, 10, 2025).unwrap();
/// assert_eq!((15, 8), (lunar.day, lunar.month));
/// assert_eq!(1, cache.len());
/// ```
#[derive(Debug, Clone)]
pub struct LunarCache {
    capacity: NonZeroUsize,
    tz_offset_hours: i32,
    entries: HashMap<CacheKey, LunarDate>,
    order: VecDeque<CacheKey>,
}

impl LunarCache {
    /// An empty cache holding at most `capacity` conversions for the
    /// timezone `tz_offset_hours` ahead of UTC.
    pub fn new(capacity: NonZeroUsize, tz_offset_hours: i32) -> Self {
        Self {
            capacity,
            tz_offset_hours,
            entries: HashMap::with_capacity(capacity.get()),
            order: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// An empty cache sized and zoned by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_capacity, config.tz_offset_hours)
    }

    /// Lunar date of the Gregorian `day`/`month`/`year`, computed on first
    /// request.
    pub fn get(&mut self, day: i32, month: i32, year: i32) -> Result<LunarDate> {
        let key = CacheKey::new(day, month, year);
        if let Some(&lunar) = self.entries.get(&key) {
            return Ok(lunar);
        }
        trace!(%key, "lunar cache miss");
        let date = Date::from_gregorian(year, month, day)?;
        let lunar = LunarDate::from_date(date, self.tz_offset_hours)?;
        self.insert(key, lunar);
        Ok(lunar)
    }

    /// [`get`](Self::get) for an already validated [`Date`].
    pub fn get_date(&mut self, date: Date) -> Result<LunarDate> {
        let (year, month, day) = date.gregorian();
        self.get(day, month, year)
    }

    fn insert(&mut self, key: CacheKey, lunar: LunarDate) {
        if self.entries.len() >= self.capacity.get() {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(evicted = %oldest, "lunar cache full");
            }
        }
        self.entries.insert(key, lunar);
        self.order.push_back(key);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// `true` if the conversion of `day`/`month`/`year` is cached.
    pub fn contains(&self, day: i32, month: i32, year: i32) -> bool {
        self.entries.contains_key(&CacheKey::new(day, month, year))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn tz_offset_hours(&self) -> i32 {
        self.tz_offset_hours
    }

    /// Cached keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = CacheKey> + '_ {
        self.order.iter().copied()
    }
}

impl Default for LunarCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A [`LunarCache`] behind a mutex, for hosts that render from several
/// threads. The lookup, the conversion and the insertion happen under one
/// lock.
#[derive(Debug, Default)]
pub struct SharedLunarCache {
    inner: Mutex<LunarCache>,
}

impl SharedLunarCache {
    pub fn new(cache: LunarCache) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// See [`LunarCache::get`].
    pub fn get(&self, day: i32, month: i32, year: i32) -> Result<LunarDate> {
        self.inner.lock().get(day, month, year)
    }

    /// See [`LunarCache::get_date`].
    pub fn get_date(&self, date: Date) -> Result<LunarDate> {
        self.inner.lock().get_date(date)
    }

    /// See [`LunarCache::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lunar::convert_solar_to_lunar;

    fn cache(capacity: usize) -> LunarCache {
        LunarCache::new(NonZeroUsize::new(capacity).unwrap(), 7)
    }

    #[test]
    fn keys_do_not_collide() {
        // naive concatenation would map both to "2025111"
        assert_ne!(CacheKey::new(1, 11, 2025), CacheKey::new(11, 1, 2025));
        assert_eq!("2025-11-01", CacheKey::new(1, 11, 2025).to_string());
        assert_eq!("2025-01-11", CacheKey::new(11, 1, 2025).to_string());
        assert_eq!(
            CacheKey::new(6, 10, 2025),
            CacheKey::from(Date::from_gregorian(2025, 10, 6).unwrap())
        );
    }

    #[test]
    fn same_as_converter() {
        let mut c = cache(16);
        for d in 1..=31 {
            let direct = convert_solar_to_lunar(d, 10, 2025, 7);
            assert_eq!(direct, c.get(d, 10, 2025));
            assert_eq!(direct, c.get(d, 10, 2025));
        }
        assert_eq!(16, c.len());
    }

    #[test]
    fn fifo_eviction() {
        let mut c = cache(3);
        for d in 1..=3 {
            c.get(d, 1, 2025).unwrap();
        }
        // a hit does not refresh day 1
        c.get(1, 1, 2025).unwrap();
        c.get(4, 1, 2025).unwrap();
        assert!(!c.contains(1, 1, 2025));
        for d in 2..=4 {
            assert!(c.contains(d, 1, 2025));
        }
        assert_eq!(
            vec!["2025-01-02", "2025-01-03", "2025-01-04"],
            c.keys().map(|k| k.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn errors_not_cached() {
        let mut c = cache(4);
        assert!(matches!(c.get(1, 13, 2025), Err(Error::InvalidDate { .. })));
        assert_eq!(Err(Error::OutOfRange { year: 1000 }), c.get(1, 1, 1000));
        assert!(c.is_empty());
        assert!(!c.contains(1, 1, 1000));
    }

    #[test]
    fn clear() {
        let mut c = cache(4);
        c.get(6, 10, 2025).unwrap();
        c.clear();
        assert!(c.is_empty());
        assert_eq!(0, c.keys().count());
        c.get(6, 10, 2025).unwrap();
        assert_eq!(1, c.len());
    }

    #[test]
    fn defaults() {
        let c = LunarCache::default();
        assert_eq!(1000, c.capacity().get());
        assert_eq!(7, c.tz_offset_hours());
    }

    #[test]
    fn shared_across_threads() {
        let shared = SharedLunarCache::new(cache(64));
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for d in 1..=31 {
                        shared.get(d, 10, 2025).unwrap();
                    }
                });
            }
        });
        assert_eq!(31, shared.len());
        assert_eq!(
            convert_solar_to_lunar(21, 10, 2025, 7),
            shared.get_date(Date::from_gregorian(2025, 10, 21).unwrap())
        );
        shared.clear();
        assert!(shared.is_empty());
    }
}
