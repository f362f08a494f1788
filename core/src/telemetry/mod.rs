//! telemetry/mod.rs
//! Pool counters and immutable snapshots for the pooled codec.
//!
//! Notes:
//! - Counters are plain atomics updated on lease/release, never locked.
//! - Snapshots are immutable copies, serializable for logs and dashboards.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
