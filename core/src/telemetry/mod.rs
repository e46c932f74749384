//! telemetry/mod.rs
//! Per-context counters and immutable snapshots.
//!
//! Industry notes:
//! - Counters live inside each context, so no locks or atomics are involved;
//!   aggregate across contexts with `merge`.
//! - Snapshots serialize to JSON for logs and dashboards.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
