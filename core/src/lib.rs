//! codec-core
//!
//! Pooled streaming zstd compression.
//! Reusable coders, bounded memory, safe under concurrent callers.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod compression;
pub mod telemetry;

pub use compression::{compress, decompress, default_codec, Codec, CodecConfig};
pub use types::CodecError;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{Codec, CodecConfig, CoderPool, Lease};
    pub use crate::telemetry::{CodecSnapshot, PoolSnapshot, StreamStats};
    pub use crate::types::CodecError;
}
