//! telemetry/counters.rs
//! Lifetime counters for one coder pool.
//!
//! Summary: Tracks how many coders were built, leased, reused, released and discarded.
//! Converted into an immutable `PoolSnapshot` on demand.
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters shared by every lease of a pool.
#[derive(Debug, Default)]
pub struct PoolCounters {
    created: AtomicU64,
    leased: AtomicU64,
    reused: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl PoolCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// A coder was constructed by the pool factory.
    pub fn add_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// A coder was handed out; `reused` when it came from the idle queue.
    pub fn add_leased(&self, reused: bool) {
        self.leased.fetch_add(1, Ordering::Relaxed);
        if reused {
            self.reused.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// A lease ended and the coder went back to the idle queue.
    pub fn add_released(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    /// A lease ended but the coder was dropped (pool full or reset failed).
    pub fn add_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn leased(&self) -> u64 {
        self.leased.load(Ordering::Relaxed)
    }

    pub fn reused(&self) -> u64 {
        self.reused.load(Ordering::Relaxed)
    }

    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Relaxed)
    }

    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Leases currently outstanding.
    pub fn in_flight(&self) -> u64 {
        self.leased()
            .saturating_sub(self.released())
            .saturating_sub(self.discarded())
    }
}
