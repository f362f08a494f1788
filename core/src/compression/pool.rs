//! compression/pool.rs
//! Bounded pool of reusable coders with exclusive, RAII-scoped leases.
//!
//! Design notes:
//! - Idle coders sit in a lock-free `ArrayQueue`; only lease/release touch it.
//! - A pool holds one concrete coder type, so a lease can never be the wrong kind.
//! - At most `max_idle` coders are kept. Extra ones built under load are
//!   dropped when their lease ends.
//! - One coder is built eagerly in `new` so construction failures show up at startup.

use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;
use log::{debug, warn};

use crate::compression::types::Coder;
use crate::function_path;
use crate::telemetry::{PoolCounters, PoolSnapshot};
use crate::types::CodecError;

type Factory<T> = Box<dyn Fn() -> io::Result<T> + Send + Sync>;

pub struct CoderPool<T> {
    name: &'static str,
    idle: ArrayQueue<T>,
    factory: Factory<T>,
    counters: PoolCounters,
}

impl<T: Coder> CoderPool<T> {
    /// Build a pool keeping at most `max_idle` idle coders.
    ///
    /// # Errors
    /// - `CodecError::Config` if `max_idle` is zero.
    /// - `CodecError::Init` if the factory fails to build the first coder.
    pub fn new<F>(name: &'static str, max_idle: usize, factory: F) -> Result<Self, CodecError>
    where
        F: Fn() -> io::Result<T> + Send + Sync + 'static,
    {
        if max_idle == 0 {
            return Err(CodecError::Config(format!("{name}: max_idle must be at least 1")));
        }
        let pool = Self {
            name,
            idle: ArrayQueue::new(max_idle),
            factory: Box::new(factory),
            counters: PoolCounters::new(),
        };
        let first = pool.create()?;
        // Cannot fail: the queue is empty and has room for at least one.
        let _ = pool.idle.push(first);
        Ok(pool)
    }

    fn create(&self) -> Result<T, CodecError> {
        let op = function_path!();
        let coder = (self.factory)().map_err(|source| CodecError::Init { op, source })?;
        self.counters.add_created();
        debug!("[POOL:{}] created coder #{}", self.name, self.counters.created());
        Ok(coder)
    }

    /// Take an idle coder, or build a new one if none is idle.
    /// The coder goes back to the pool when the returned lease drops.
    pub fn lease(&self) -> Result<Lease<'_, T>, CodecError> {
        let (coder, reused) = match self.idle.pop() {
            Some(coder) => (coder, true),
            None => (self.create()?, false),
        };
        self.counters.add_leased(reused);
        Ok(Lease {
            pool: self,
            coder: Some(coder),
        })
    }

    fn release(&self, mut coder: T) {
        if let Err(e) = coder.reset() {
            warn!("[POOL:{}] discarding coder after failed reset: {e}", self.name);
            self.counters.add_discarded();
            return;
        }
        match self.idle.push(coder) {
            Ok(()) => self.counters.add_released(),
            Err(_extra) => {
                debug!("[POOL:{}] idle queue full, dropping coder", self.name);
                self.counters.add_discarded();
            }
        }
    }
}

impl<T> CoderPool<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Coders currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    pub fn max_idle(&self) -> usize {
        self.idle.capacity()
    }

    pub fn counters(&self) -> &PoolCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot::from(&self.counters, self.idle(), self.max_idle())
    }
}

impl<T> fmt::Debug for CoderPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoderPool")
            .field("name", &self.name)
            .field("idle", &self.idle.len())
            .field("max_idle", &self.idle.capacity())
            .field("counters", &self.counters)
            .finish()
    }
}

/// Exclusive handle to a pooled coder. Dropping it returns the coder exactly once.
pub struct Lease<'a, T: Coder> {
    pool: &'a CoderPool<T>,
    coder: Option<T>,
}

impl<T: Coder> Deref for Lease<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only `drop` takes the coder out.
        self.coder.as_ref().unwrap_or_else(|| unreachable!("lease used after release"))
    }
}

impl<T: Coder> DerefMut for Lease<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.coder.as_mut().unwrap_or_else(|| unreachable!("lease used after release"))
    }
}

impl<T: Coder> Drop for Lease<'_, T> {
    fn drop(&mut self) {
        if let Some(coder) = self.coder.take() {
            self.pool.release(coder);
        }
    }
}

impl<T: Coder> fmt::Debug for Lease<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease").field("pool", &self.pool.name).finish()
    }
}
