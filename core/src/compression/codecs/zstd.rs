//! src/compression/codecs/zstd.rs
//!
//! Reusable zstd streaming encoder/decoder.
//!
//! Design notes:
//! - Wraps the zstd raw streaming contexts so one context serves many streams.
//! - `reset` only resets the session; level, checksum and window limits survive.
//! - Callers own the buffers; nothing here allocates per chunk.

use std::io;

use zstd::stream::raw::{Decoder as RawDecoder, Encoder as RawEncoder, Operation};
use zstd::zstd_safe::{CParameter, DParameter, OutBuffer};

use crate::compression::types::{Coder, Step};

/// Zstd streaming compressor.
/// - Holds one compression context for its whole life.
/// - Feed with `encode`, end each frame with `finish`.
pub struct ZstdEncoder {
    raw: RawEncoder<'static>,
    level: i32,
}

/// Zstd streaming decompressor.
/// - Holds one decompression context for its whole life.
/// - Decodes concatenated frames one after the other.
pub struct ZstdDecoder {
    raw: RawDecoder<'static>,
}

impl ZstdEncoder {
    /// Create an encoder at `level`, optionally appending a content checksum to every frame.
    ///
    /// # Errors
    /// - Returns the zstd error if the context cannot be allocated or configured.
    pub fn new(level: i32, checksum: bool) -> io::Result<Self> {
        let mut raw = RawEncoder::new(level)?;
        raw.set_parameter(CParameter::ChecksumFlag(checksum))?;
        Ok(Self { raw, level })
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Compress as much of `input` as fits into `output`.
    pub fn encode(&mut self, input: &[u8], output: &mut [u8]) -> io::Result<Step> {
        let status = self.raw.run_on_buffers(input, output)?;
        Ok(Step {
            consumed: status.bytes_read,
            written: status.bytes_written,
            remaining: status.remaining,
        })
    }

    /// End the current frame, draining buffered bytes into `output`.
    /// Call until `remaining` is zero.
    pub fn finish(&mut self, output: &mut [u8]) -> io::Result<Step> {
        let mut out = OutBuffer::around(output);
        let remaining = self.raw.finish(&mut out, true)?;
        Ok(Step {
            consumed: 0,
            written: out.pos(),
            remaining,
        })
    }
}

impl Coder for ZstdEncoder {
    fn reset(&mut self) -> io::Result<()> {
        self.raw.reinit()
    }
}

impl ZstdDecoder {
    /// Create a decoder. `window_log_max` caps the window a frame may request.
    ///
    /// # Errors
    /// - Returns the zstd error if the context cannot be allocated or configured.
    pub fn new(window_log_max: Option<u32>) -> io::Result<Self> {
        let mut raw = RawDecoder::new()?;
        if let Some(log) = window_log_max {
            raw.set_parameter(DParameter::WindowLogMax(log))?;
        }
        Ok(Self { raw })
    }

    /// Decode as much of `input` as possible into `output`.
    /// A zero `remaining` means the current frame is fully decoded and flushed.
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> io::Result<Step> {
        let status = self.raw.run_on_buffers(input, output)?;
        Ok(Step {
            consumed: status.bytes_read,
            written: status.bytes_written,
            remaining: status.remaining,
        })
    }
}

impl Coder for ZstdDecoder {
    fn reset(&mut self) -> io::Result<()> {
        self.raw.reinit()
    }
}
