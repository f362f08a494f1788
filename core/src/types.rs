use std::io;
use thiserror::Error;

/// Unified codec error covering configuration, coder setup, streaming and decoding.
/// - Operational variants carry the path of the function that failed (`op`).
/// - Messages read `op -> phase -> cause` so the source error text stays a suffix.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Invalid `CodecConfig` value, caught before any coder is built.
    #[error("invalid codec config: {0}")]
    Config(String),

    /// The underlying zstd context could not be constructed or configured.
    #[error("{op} -> coder init failed -> {source}")]
    Init {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Resetting a leased coder before use failed.
    #[error("{op} -> coder reset failed -> {source}")]
    Bind {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Reading the input or writing the output failed mid-stream.
    /// Some bytes may already be in the output sink.
    #[error("{op} -> stream copy failed -> {source}")]
    Copy {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Ending the frame or flushing the output sink failed.
    /// All input was consumed but the output is incomplete.
    #[error("{op} -> finalize failed -> {source}")]
    Finalize {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The decoder rejected the compressed bytes.
    #[error("{op} -> corrupt compressed input -> {source}")]
    Corrupt {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The compressed input ended in the middle of a frame.
    #[error("{op} -> truncated compressed input: stream ended mid-frame")]
    Truncated { op: &'static str },
}

impl CodecError {
    /// Function path recorded for operational errors.
    pub fn op(&self) -> Option<&'static str> {
        match self {
            CodecError::Config(_) => None,
            CodecError::Init { op, .. }
            | CodecError::Bind { op, .. }
            | CodecError::Copy { op, .. }
            | CodecError::Finalize { op, .. }
            | CodecError::Corrupt { op, .. }
            | CodecError::Truncated { op } => Some(*op),
        }
    }

    /// Underlying I/O error kind, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            CodecError::Init { source, .. }
            | CodecError::Bind { source, .. }
            | CodecError::Copy { source, .. }
            | CodecError::Finalize { source, .. }
            | CodecError::Corrupt { source, .. } => Some(source.kind()),
            CodecError::Config(_) | CodecError::Truncated { .. } => None,
        }
    }
}
