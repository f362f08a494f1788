//! Shared mock streams and payload generators for integration tests.
#![allow(dead_code)]

use std::io::{self, Read, Write};

/// Deterministic, poorly compressible bytes (LCG output).
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

/// Text-like, highly compressible bytes.
pub fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Reader that hands out at most `max_read` bytes per call and records the
/// largest buffer it was offered.
pub struct ShortReader<'a> {
    data: &'a [u8],
    max_read: usize,
    pub largest_buf: usize,
    pub interrupt_every: Option<usize>,
    calls: usize,
}

impl<'a> ShortReader<'a> {
    pub fn new(data: &'a [u8], max_read: usize) -> Self {
        Self { data, max_read, largest_buf: 0, interrupt_every: None, calls: 0 }
    }

    pub fn interrupting(mut self, every: usize) -> Self {
        self.interrupt_every = Some(every);
        self
    }
}

impl Read for ShortReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        self.largest_buf = self.largest_buf.max(buf.len());
        if let Some(every) = self.interrupt_every {
            if self.calls % every == 0 {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
            }
        }
        let n = buf.len().min(self.max_read).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that yields `ok_bytes` of `data` and then fails.
pub struct FailingReader<'a> {
    data: &'a [u8],
    ok_bytes: usize,
}

impl<'a> FailingReader<'a> {
    pub fn new(data: &'a [u8], ok_bytes: usize) -> Self {
        Self { data, ok_bytes }
    }
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok_bytes == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away"));
        }
        let n = buf.len().min(self.ok_bytes).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.ok_bytes -= n;
        Ok(n)
    }
}

/// Writer that accepts `limit` bytes, then fails every write with `BrokenPipe`.
pub struct FailAfter {
    pub limit: usize,
    pub data: Vec<u8>,
}

impl FailAfter {
    pub fn new(limit: usize) -> Self {
        Self { limit, data: Vec::new() }
    }
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.data.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(room);
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that accepts everything but fails on `flush`.
#[derive(Default)]
pub struct FailingFlush {
    pub data: Vec<u8>,
}

impl Write for FailingFlush {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::WriteZero, "flush refused"))
    }
}

/// Writer that records the largest single write it received.
#[derive(Default)]
pub struct TrackingWriter {
    pub data: Vec<u8>,
    pub largest_write: usize,
}

impl Write for TrackingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.largest_write = self.largest_write.max(buf.len());
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
