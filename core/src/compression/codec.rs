//! compression/codec.rs
//! Public entry points: `CodecConfig`, the pooled `Codec`, and process-wide helpers.
//!
//! Prefer building a `Codec` where the application is wired up and passing it
//! by reference. The free `compress`/`decompress` functions use a lazily built
//! default codec shared by the whole process; it is `Sync` and safe to call
//! from any thread.

use std::io::{Read, Write};
use std::sync::OnceLock;

use log::debug;

use crate::compression::codecs::{ZstdDecoder, ZstdEncoder};
use crate::compression::pool::CoderPool;
use crate::compression::stream::{compress_stream, decompress_stream};
use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_IDLE_DECODERS, DEFAULT_MAX_IDLE_ENCODERS, MAX_CHUNK_SIZE,
    WINDOW_LOG_MAX, WINDOW_LOG_MIN,
};
use crate::telemetry::{CodecSnapshot, StreamStats};
use crate::types::CodecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Zstd compression level; must sit inside `zstd::compression_level_range()`.
    pub level: i32,

    /// Append a content checksum to every frame written.
    pub checksum: bool,

    /// Size of the read and write buffers used per call.
    pub chunk_size: usize,

    /// Idle encoders kept for reuse. Extra encoders built under load are dropped.
    pub max_idle_encoders: usize,

    /// Idle decoders kept for reuse.
    pub max_idle_decoders: usize,

    /// Largest window (as log2) a frame may ask the decoder for.
    /// `None` keeps the zstd default limit.
    pub window_log_max: Option<u32>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            level: zstd::DEFAULT_COMPRESSION_LEVEL,
            checksum: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_idle_encoders: DEFAULT_MAX_IDLE_ENCODERS,
            max_idle_decoders: DEFAULT_MAX_IDLE_DECODERS,
            window_log_max: None,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_max_idle(mut self, encoders: usize, decoders: usize) -> Self {
        self.max_idle_encoders = encoders;
        self.max_idle_decoders = decoders;
        self
    }

    pub fn with_window_log_max(mut self, window_log_max: u32) -> Self {
        self.window_log_max = Some(window_log_max);
        self
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        let levels = zstd::compression_level_range();
        if !levels.contains(&self.level) {
            return Err(CodecError::Config(format!(
                "level {} outside {}..={}",
                self.level,
                levels.start(),
                levels.end()
            )));
        }
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(CodecError::Config(format!(
                "chunk_size {} outside 1..={}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.max_idle_encoders == 0 || self.max_idle_decoders == 0 {
            return Err(CodecError::Config("max_idle must be at least 1".into()));
        }
        if let Some(window) = self.window_log_max {
            if !(WINDOW_LOG_MIN..=WINDOW_LOG_MAX).contains(&window) {
                return Err(CodecError::Config(format!(
                    "window_log_max {window} outside {WINDOW_LOG_MIN}..={WINDOW_LOG_MAX}"
                )));
            }
        }
        Ok(())
    }
}

/// Zstd codec backed by one encoder pool and one decoder pool.
#[derive(Debug)]
pub struct Codec {
    config: CodecConfig,
    encoders: CoderPool<ZstdEncoder>,
    decoders: CoderPool<ZstdDecoder>,
}

impl Codec {
    /// Validate `config` and build both pools, each with one ready coder.
    ///
    /// # Errors
    /// - `CodecError::Config` for invalid settings.
    /// - `CodecError::Init` if a zstd context cannot be built.
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        config.validate()?;

        let (level, checksum) = (config.level, config.checksum);
        let encoders = CoderPool::new("zstd-encoder", config.max_idle_encoders, move || {
            ZstdEncoder::new(level, checksum)
        })?;

        let window_log_max = config.window_log_max;
        let decoders = CoderPool::new("zstd-decoder", config.max_idle_decoders, move || {
            ZstdDecoder::new(window_log_max)
        })?;

        Ok(Self { config, encoders, decoders })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress all of `input` into a single zstd frame written to `output`.
    ///
    /// On error `output` must not be trusted. If reading `input` fails, the
    /// frame is still ended best effort, so `output` can hold a complete,
    /// valid frame of only the bytes read before the failure. It decodes
    /// cleanly; only the returned `CodecError::Copy` tells it is short.
    pub fn compress<R, W>(&self, input: &mut R, output: &mut W) -> Result<StreamStats, CodecError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut encoder = self.encoders.lease()?;
        compress_stream(&mut encoder, input, output, self.config.chunk_size)
    }

    /// Decompress zstd frames from `input` into `output`.
    ///
    /// On error `output` may hold a prefix of the plain bytes.
    pub fn decompress<R, W>(&self, input: &mut R, output: &mut W) -> Result<StreamStats, CodecError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut decoder = self.decoders.lease()?;
        decompress_stream(&mut decoder, input, output, self.config.chunk_size)
    }

    /// In-memory convenience over `compress`.
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.compress(&mut &data[..], &mut out)?;
        Ok(out)
    }

    /// In-memory convenience over `decompress`.
    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.decompress(&mut &data[..], &mut out)?;
        Ok(out)
    }

    pub fn pool_stats(&self) -> CodecSnapshot {
        CodecSnapshot {
            encoders: self.encoders.snapshot(),
            decoders: self.decoders.snapshot(),
        }
    }
}

static DEFAULT_CODEC: OnceLock<Codec> = OnceLock::new();

/// Process-wide codec built from `CodecConfig::default()` on first use.
///
/// # Errors
/// - `CodecError::Init` if the first construction fails; a later call retries.
pub fn default_codec() -> Result<&'static Codec, CodecError> {
    if let Some(codec) = DEFAULT_CODEC.get() {
        return Ok(codec);
    }
    let codec = Codec::new(CodecConfig::default())?;
    debug!("[CODEC] default codec initialised");
    // A racing thread may have won; its codec is kept and ours is dropped.
    Ok(DEFAULT_CODEC.get_or_init(|| codec))
}

/// Compress `input` into `output` with the process-wide default codec.
pub fn compress<R, W>(input: &mut R, output: &mut W) -> Result<StreamStats, CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    default_codec()?.compress(input, output)
}

/// Decompress `input` into `output` with the process-wide default codec.
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<StreamStats, CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    default_codec()?.decompress(input, output)
}
