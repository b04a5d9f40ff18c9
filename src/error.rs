//! Error types for evictkit.
//!
//! Cache operations never fail: misses and empty pops are `None`. Errors only
//! come from two places:
//!
//! - [`ConfigError`]: a policy discriminator from outside the type system
//!   (a number or a name) that does not select a supported policy.
//! - [`InvariantError`]: returned by the `check_invariants` methods when the
//!   index and the ordering list disagree.
//!
//! ```
//! use evictkit::builder::CachePolicy;
//! use evictkit::error::ConfigError;
//!
//! let policy: Result<CachePolicy, ConfigError> = "lru".parse();
//! assert_eq!(policy, Ok(CachePolicy::Lru));
//!
//! let unknown = "lfu".parse::<CachePolicy>().unwrap_err();
//! assert!(unknown.message().contains("lfu"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the index and the ordering list of a cache disagree.
///
/// Produced by [`OrderedStore::check_invariants`](crate::store::OrderedStore::check_invariants)
/// and the policy caches that forward to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a cache cannot be configured as requested.
///
/// The usual source is an unknown policy discriminator passed to
/// [`CachePolicy::try_from`](crate::builder::CachePolicy) or `str::parse`.
///
/// ```
/// use evictkit::builder::CachePolicy;
///
/// let err = CachePolicy::try_from(7u8).unwrap_err();
/// assert_eq!(err.to_string(), "unknown cache policy discriminator: 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
