//! compression/mod.rs
//! Pooled streaming compression and decompression.
//!
//! Notes:
//! - Coders are leased from bounded pools and reset on every lease and release.
//! - Streams are copied chunk by chunk; the payload is never buffered whole.
//! - The zstd format is delegated to the `zstd` crate, frames are standard.

pub mod codec;
pub mod codecs;
pub mod pool;
pub mod stream;
pub mod types;

pub use codec::*;
pub use pool::{CoderPool, Lease};
pub use types::*;
