//! Query cache configuration.

use std::{num::NonZeroUsize, time::Duration};

const DEFAULT_CAPACITY: usize = 64;
const DEFAULT_TTL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether search results are memoized at all.
    pub enabled: bool,
    /// Maximum number of distinct normalized queries retained.
    pub capacity: usize,
    /// How long a memoized result stays fresh.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            capacity: settings.capacity.get(),
            ttl: settings.ttl,
        }
    }
}

impl CacheConfig {
    /// Returns the capacity as NonZeroUsize, clamping to 1 if zero.
    pub fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}
