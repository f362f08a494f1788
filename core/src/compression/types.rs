//! compression/types.rs
//! Shared coder contract for pooled compressors and decompressors.
use std::io;

/// A stateful compressor or decompressor that can be reused across streams.
///
/// Implementors are expensive to build and cheap to reset. `reset` must drop
/// any state tied to the previous stream while keeping parameters such as the
/// compression level.
// Require Send so idle coders can move between threads through the pool.
pub trait Coder: Send {
    /// Discard stream-scoped state so the next stream starts clean.
    fn reset(&mut self) -> io::Result<()>;
}

/// Progress reported by one step of a streaming coder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    /// Bytes taken from the input slice.
    pub consumed: usize,
    /// Bytes produced into the output slice.
    pub written: usize,
    /// Encoder: bytes still buffered internally. Decoder: hint for the next
    /// input size, zero once the current frame is complete and flushed.
    pub remaining: usize,
}
