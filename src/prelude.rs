pub use crate::builder::{Cache, CacheBuilder, CacheConfig, CachePolicy, SharedCache, new_cache};
pub use crate::concurrent::Concurrent;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::policy::ordered::{EvictionPolicy, OrderedCache};
pub use crate::traits::{ConcurrentCache, CoreCache};
