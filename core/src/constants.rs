//! constants.rs
//! Defaults and sanity bounds shared by the codec and its pools.

/// Defaults when a `CodecConfig` field is left untouched.
pub const DEFAULT_CHUNK_SIZE: usize = 128 * 1024; // 128 KiB, close to zstd's recommended stream buffer
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Idle coders kept per pool before extra ones are dropped on release.
pub const DEFAULT_MAX_IDLE_ENCODERS: usize = 16;
pub const DEFAULT_MAX_IDLE_DECODERS: usize = 16;

/// Decoder window limit bounds (log2), as accepted by zstd's `windowLogMax`.
pub const WINDOW_LOG_MIN: u32 = 10;
#[cfg(target_pointer_width = "64")]
pub const WINDOW_LOG_MAX: u32 = 31;
#[cfg(not(target_pointer_width = "64"))]
pub const WINDOW_LOG_MAX: u32 = 30;

/// Zstd frame magic number (little-endian on the wire).
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Alphabets used by the random string helpers.
pub mod alphabets {
    pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    pub const DIGITS: &[u8] = b"0123456789";
}

/// FNV-1a parameters (64 and 128 bit).
pub mod fnv {
    pub const OFFSET_64: u64 = 0xcbf2_9ce4_8422_2325;
    pub const PRIME_64: u64 = 0x0000_0100_0000_01b3;
    pub const OFFSET_128: u128 = 0x6c62_272e_07bb_0142_62b8_2175_6295_c58d;
    pub const PRIME_128: u128 = 0x0000_0000_0100_0000_0000_0000_0000_013b;
}
