//! evictkit: bounded in-memory key-value caches with FIFO, LRU and MRU
//! eviction, a mutex decorator for sharing them between threads, and a
//! runtime policy factory.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = new_cache::<&str, u32>(CachePolicy::Lru, 2);
//! cache.add("a", 1);
//! cache.add("b", 2);
//! cache.get(&"a");
//! cache.add("c", 3);
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod concurrent;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
