//! Eviction policies built on the shared [`OrderedCache`].

pub mod fifo;
pub mod lru;
pub mod mru;
pub mod ordered;

pub use fifo::{Fifo, FifoCache};
pub use lru::{Lru, LruCache};
pub use mru::{Mru, MruCache};
pub use ordered::{EvictionPolicy, OrderedCache};
