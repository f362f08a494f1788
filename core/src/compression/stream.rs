//! compression/stream.rs
//! Streaming copy loops that drive a leased coder between a caller's reader and writer.
//!
//! Memory per call is two `chunk_size` buffers, whatever the payload size.
use std::io::{self, Read, Write};
use std::time::Instant;

use log::{debug, warn};

use crate::compression::codecs::{ZstdDecoder, ZstdEncoder};
use crate::compression::types::Coder;
use crate::function_path;
use crate::telemetry::StreamStats;
use crate::types::CodecError;

/// Writer adapter that counts bytes accepted by the inner sink.
struct CountingWriter<'a, W: Write + ?Sized> {
    inner: &'a mut W,
    written: u64,
}

impl<'a, W: Write + ?Sized> CountingWriter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Single read that retries on `Interrupted`.
fn read_some<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match r.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Summary: Compress everything readable from `input` into one zstd frame written to `output`.
/// - Resets the encoder first so no earlier stream state leaks in.
/// - On a copy failure the frame is still ended (best effort) before the error returns.
/// - Flushes `output` after the frame trailer.
pub fn compress_stream<R, W>(
    encoder: &mut ZstdEncoder,
    input: &mut R,
    output: &mut W,
    chunk_size: usize,
) -> Result<StreamStats, CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let op = function_path!();
    let start = Instant::now();
    encoder.reset().map_err(|source| CodecError::Bind { op, source })?;

    let mut sink = CountingWriter::new(output);
    let mut in_buf = vec![0u8; chunk_size];
    let mut out_buf = vec![0u8; chunk_size];

    let bytes_in = match feed_encoder(encoder, input, &mut sink, &mut in_buf, &mut out_buf) {
        Ok(n) => n,
        Err(source) => {
            if let Err(e) = finish_frame(encoder, &mut sink, &mut out_buf) {
                warn!("[COMPRESS] finalize after copy failure also failed: {e}");
            }
            return Err(CodecError::Copy { op, source });
        }
    };
    finish_frame(encoder, &mut sink, &mut out_buf)
        .map_err(|source| CodecError::Finalize { op, source })?;

    let stats = StreamStats {
        bytes_in,
        bytes_out: sink.written,
        elapsed: start.elapsed(),
    };
    debug!("[COMPRESS] {} -> {} bytes in {:?}", stats.bytes_in, stats.bytes_out, stats.elapsed);
    Ok(stats)
}

fn feed_encoder<R, W>(
    encoder: &mut ZstdEncoder,
    input: &mut R,
    sink: &mut W,
    in_buf: &mut [u8],
    out_buf: &mut [u8],
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut total = 0u64;
    loop {
        let n = read_some(input, in_buf)?;
        if n == 0 {
            return Ok(total);
        }
        total += n as u64;

        let mut chunk = &in_buf[..n];
        while !chunk.is_empty() {
            let step = encoder.encode(chunk, out_buf)?;
            sink.write_all(&out_buf[..step.written])?;
            chunk = &chunk[step.consumed..];
        }
    }
}

fn finish_frame<W: Write>(
    encoder: &mut ZstdEncoder,
    sink: &mut W,
    out_buf: &mut [u8],
) -> io::Result<()> {
    loop {
        let step = encoder.finish(out_buf)?;
        sink.write_all(&out_buf[..step.written])?;
        if step.remaining == 0 {
            break;
        }
    }
    sink.flush()
}

/// Summary: Decompress zstd frames read from `input`, writing plain bytes to `output`.
/// - Concatenated frames decode in order; empty input yields empty output.
/// - Decoder rejections map to `Corrupt`, a stream cut mid-frame to `Truncated`.
/// - I/O failures on either side map to `Copy`.
pub fn decompress_stream<R, W>(
    decoder: &mut ZstdDecoder,
    input: &mut R,
    output: &mut W,
    chunk_size: usize,
) -> Result<StreamStats, CodecError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let op = function_path!();
    let start = Instant::now();
    decoder.reset().map_err(|source| CodecError::Bind { op, source })?;

    let mut sink = CountingWriter::new(output);
    let mut in_buf = vec![0u8; chunk_size];
    let mut out_buf = vec![0u8; chunk_size];

    let mut bytes_in = 0u64;
    let (mut pos, mut len) = (0usize, 0usize);
    let mut eof = false;
    // True while bytes of an unfinished frame have been fed to the decoder.
    let mut in_frame = false;

    loop {
        if pos == len && !eof {
            len = read_some(input, &mut in_buf).map_err(|source| CodecError::Copy { op, source })?;
            pos = 0;
            bytes_in += len as u64;
            eof = len == 0;
        }

        let step = decoder
            .decode(&in_buf[pos..len], &mut out_buf)
            .map_err(|source| CodecError::Corrupt { op, source })?;
        pos += step.consumed;
        sink.write_all(&out_buf[..step.written])
            .map_err(|source| CodecError::Copy { op, source })?;

        if step.remaining == 0 {
            in_frame = false;
        } else if step.consumed > 0 || step.written > 0 {
            in_frame = true;
        }

        // Output not filled means the decoder holds nothing more for us.
        if eof && pos == len && step.written < out_buf.len() {
            if in_frame {
                return Err(CodecError::Truncated { op });
            }
            break;
        }
    }
    sink.flush().map_err(|source| CodecError::Finalize { op, source })?;

    let stats = StreamStats {
        bytes_in,
        bytes_out: sink.written,
        elapsed: start.elapsed(),
    };
    debug!("[DECOMPRESS] {} -> {} bytes in {:?}", stats.bytes_in, stats.bytes_out, stats.elapsed);
    Ok(stats)
}
