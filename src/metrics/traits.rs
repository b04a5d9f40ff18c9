//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into separate traits so the
//! cache code only ever increments counters.
//!
//! ```text
//!   ┌──────────────────────────┐
//!   │   CoreMetricsRecorder    │  written by the caches (&mut self)
//!   └────────────┬─────────────┘
//!                │
//!                ▼
//!   ┌──────────────────────────┐      ┌──────────────────────────┐
//!   │ MetricsSnapshotProvider  │ ───► │    MetricsExporter<S>    │
//!   │ snapshot() → S (Copy)    │      │ export(&S)               │
//!   └──────────────────────────┘      └──────────────────────────┘
//! ```

/// Counters shared by every eviction policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    /// An entry removed to keep the cache within its bound.
    fn record_evicted_entry(&mut self);
    /// An explicit `pop` call, found or not.
    fn record_pop_call(&mut self);
    fn record_pop_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
