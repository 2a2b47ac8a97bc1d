//! RateCache: thread-safe facade over the LRU list

use parking_lot::RwLock;

use crate::error::{Error, LoaderError, Result};
use crate::lru::LruList;

/// Miss handler invoked by [`RateCache::fast_rate_lookup`] to produce a value
/// for an uncached key. May be arbitrarily slow; it runs with no cache lock
/// held.
pub type LoaderFn<'a> = &'a dyn Fn(&str) -> std::result::Result<f64, LoaderError>;

/// Fixed-capacity LRU cache mapping string keys to rate values.
///
/// Index and recency list are guarded together by one `RwLock`, so every
/// mutating operation is a single exclusive section and the length never
/// exceeds the capacity chosen at construction.
pub struct RateCache {
    inner: RwLock<LruList>,
}

impl RateCache {
    /// Create a new cache with the given capacity.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries held at once
    ///
    /// # Panics
    /// Panics if `capacity` is zero. A zero-capacity cache is a caller bug,
    /// not a condition worth a recoverable error.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruList::new(capacity)),
        }
    }

    /// Look up a key, promoting it to most recently used on a hit.
    ///
    /// A miss is reported as [`Error::NotFound`] and is rejected under the
    /// read lock alone; only the promotion on a hit takes the write lock.
    ///
    /// # Arguments
    /// * `key` - Key to look up
    ///
    /// # Returns
    /// * `Result<f64>` - The cached value, or `Error::NotFound`
    pub fn get(&self, key: &str) -> Result<f64> {
        if !self.inner.read().contains(key) {
            return Err(Error::NotFound);
        }

        // The entry can be evicted between the read probe and here, so the
        // write section re-checks rather than trusting the probe.
        self.inner.write().get(key).ok_or(Error::NotFound)
    }

    /// Insert a key/value pair, evicting the least recently used entry if
    /// the cache is full.
    ///
    /// Re-inserting an existing key updates its value in place and promotes
    /// it without evicting anything.
    ///
    /// # Arguments
    /// * `key` - Key to insert
    /// * `value` - Rate value to store
    ///
    /// # Returns
    /// * `Result<()>` - Always `Ok` with the in-memory store; the error
    ///   channel is reserved for backends that can reject writes
    pub fn insert(&self, key: &str, value: f64) -> Result<()> {
        self.inner.write().insert(key, value);
        Ok(())
    }

    /// Look up a key, falling through to `loader` on a miss.
    ///
    /// On a hit the cached value is returned and the loader is never
    /// invoked. On a miss with a loader, the loader runs synchronously with
    /// no cache lock held; its result is written back via [`insert`] and
    /// returned. A loader failure surfaces as [`Error::Loader`] and nothing
    /// is cached. A miss with no loader is plain [`Error::NotFound`].
    ///
    /// The miss check and the write-back are separate lock sections, so two
    /// threads missing on the same key may both invoke the loader; the last
    /// write wins.
    ///
    /// [`insert`]: RateCache::insert
    ///
    /// # Arguments
    /// * `key` - Key to look up
    /// * `loader` - Optional miss handler producing the value for `key`
    ///
    /// # Returns
    /// * `Result<f64>` - Cached or freshly loaded value
    pub fn fast_rate_lookup(&self, key: &str, loader: Option<LoaderFn<'_>>) -> Result<f64> {
        match self.get(key) {
            Ok(value) => Ok(value),
            Err(Error::NotFound) => {
                let Some(loader) = loader else {
                    return Err(Error::NotFound);
                };
                let value = loader(key).map_err(Error::Loader)?;
                self.insert(key, value)?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    /// Get the current number of cached entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get the fixed capacity
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }
}
