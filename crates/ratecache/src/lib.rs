//! # ratecache
//!
//! Fixed-capacity, thread-safe LRU cache for string-keyed rate lookups.
//!
//! ## Architecture
//! - **Index**: AHash map from key to list slot (O(1))
//! - **LRU list**: arena-backed doubly-linked list for promotion and
//!   eviction (O(1))
//! - **Facade**: a single `RwLock` guarding index and list as one unit,
//!   with an optional fill-through loader for misses

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;

pub use cache::{LoaderFn, RateCache};
pub use error::{Error, LoaderError, Result};
