//! telemetry/snapshot.rs
//!
//! Immutable views over pool counters and per-call stream statistics.
//!
//! Design notes:
//! - `PoolSnapshot` is a point-in-time copy; counters may move right after.
//! - `StreamStats` is returned by every compress/decompress call.
//! - Both derive serde so callers can ship them as JSON.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::PoolCounters;

/// Point-in-time view of one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub created: u64,
    pub leased: u64,
    pub reused: u64,
    pub released: u64,
    pub discarded: u64,
    pub idle: usize,
    pub max_idle: usize,
}

impl PoolSnapshot {
    pub fn from(counters: &PoolCounters, idle: usize, max_idle: usize) -> Self {
        Self {
            created: counters.created(),
            leased: counters.leased(),
            reused: counters.reused(),
            released: counters.released(),
            discarded: counters.discarded(),
            idle,
            max_idle,
        }
    }

    /// Every lease has ended, either back in the queue or dropped.
    pub fn is_quiescent(&self) -> bool {
        self.leased == self.released + self.discarded
    }
}

/// Both pools of a `Codec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub encoders: PoolSnapshot,
    pub decoders: PoolSnapshot,
}

/// Byte counts and wall time of one compress/decompress call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    /// Bytes read from the caller's input.
    pub bytes_in: u64,
    /// Bytes written to the caller's output.
    pub bytes_out: u64,
    pub elapsed: Duration,
}

impl StreamStats {
    /// `bytes_out / bytes_in`, 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }

    /// Input throughput in bytes per second, 0.0 when no time elapsed.
    pub fn throughput_bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_in as f64 / secs
        } else {
            0.0
        }
    }
}
