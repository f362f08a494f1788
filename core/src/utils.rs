//! utils.rs
//! Small helpers: error wrapping, FNV-1a digests, unique identifiers,
//! random strings and partial obfuscation.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use ulid::Generator;
use uuid::Uuid;

use crate::constants::{alphabets, fnv};

/// Path of the enclosing function, e.g. `codec_core::compression::codec::Codec::compress`.
#[macro_export]
macro_rules! function_path {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        match name.strip_suffix("::__here") {
            Some(stripped) => stripped,
            None => name,
        }
    }};
}

/// Wraps an error with the calling function's path and optional context messages.
///
/// `wrap_err!(err)` or `wrap_err!(err, "reading header", "segment 3")`.
#[macro_export]
macro_rules! wrap_err {
    ($err:expr $(, $msg:expr)* $(,)?) => {
        $crate::utils::wrap_err($crate::function_path!(), $err, &[$($msg),*])
    };
}

/// Error rendered as `function -> msg[0] -> ... -> msg[n] -> cause`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedError {
    function: String,
    msgs: Vec<String>,
    cause: String,
}

impl WrappedError {
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn messages(&self) -> &[String] {
        &self.msgs
    }

    /// Wrapped error text, unchanged.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function)?;
        for msg in &self.msgs {
            write!(f, " -> {}", msg)?;
        }
        write!(f, " -> {}", self.cause)
    }
}

impl std::error::Error for WrappedError {}

pub fn wrap_err<E: fmt::Display>(function: &str, err: E, msgs: &[&str]) -> WrappedError {
    WrappedError {
        function: function.to_string(),
        msgs: msgs.iter().map(|m| m.to_string()).collect(),
        cause: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// FNV-1a digests
// ---------------------------------------------------------------------------

fn fnv1a_64(data: &[u8]) -> u64 {
    data.iter().fold(fnv::OFFSET_64, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(fnv::PRIME_64)
    })
}

fn fnv1a_128(data: &[u8]) -> u128 {
    data.iter().fold(fnv::OFFSET_128, |hash, &b| {
        (hash ^ u128::from(b)).wrapping_mul(fnv::PRIME_128)
    })
}

/// FNV-1a 64-bit digest as 16 lowercase hex chars (big-endian).
pub fn gen_hash64a(data: &[u8]) -> String {
    hex::encode(fnv1a_64(data).to_be_bytes())
}

/// FNV-1a 128-bit digest as 32 lowercase hex chars (big-endian).
pub fn gen_hash128a(data: &[u8]) -> String {
    hex::encode(fnv1a_128(data).to_be_bytes())
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

/// 64-bit FNV-1a of the decimal Unix time in nanoseconds.
pub fn time_hash64a() -> String {
    gen_hash64a(unix_nanos().to_string().as_bytes())
}

/// 128-bit FNV-1a of the decimal Unix time in nanoseconds.
pub fn time_hash128a() -> String {
    gen_hash128a(unix_nanos().to_string().as_bytes())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

static ULID_GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

/// New ULID as 26 Crockford base32 chars.
///
/// One process-wide monotonic generator: ids made in the same millisecond
/// increment the random part, so they sort in creation order.
///
/// # Errors
/// Fails only when the random part overflows within one millisecond.
pub fn ulid() -> Result<String, WrappedError> {
    let function = crate::function_path!();
    let generator = ULID_GENERATOR.get_or_init(|| Mutex::new(Generator::new()));
    let mut generator = generator.lock().unwrap_or_else(PoisonError::into_inner);
    generator
        .generate()
        .map(|id| id.to_string())
        .map_err(|e| wrap_err(function, e, &["monotonic ulid"]))
}

/// New random (v4) UUID, hyphenated lowercase.
pub fn uuid() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Random strings
// ---------------------------------------------------------------------------

const LETTER_IDX_BITS: u32 = 6;
const LETTER_IDX_MASK: u64 = (1 << LETTER_IDX_BITS) - 1;
const LETTER_IDX_MAX: u32 = 63 / LETTER_IDX_BITS;

/// Random string of `n` characters drawn from `letters` (ASCII expected).
///
/// Each 63-bit draw is split into 6-bit indices; indices past the alphabet
/// are rejected, so only the first 64 letters are ever used.
/// Returns an empty string when `letters` is empty.
pub fn random_from_bytes(n: usize, letters: &[u8]) -> String {
    if letters.is_empty() {
        return String::new();
    }
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(n);
    let mut produced = 0;
    let mut cache = rng.gen::<u64>() >> 1;
    let mut remain = LETTER_IDX_MAX;

    while produced < n {
        if remain == 0 {
            cache = rng.gen::<u64>() >> 1;
            remain = LETTER_IDX_MAX;
        }
        if let Some(&letter) = letters.get((cache & LETTER_IDX_MASK) as usize) {
            out.push(char::from(letter));
            produced += 1;
        }
        cache >>= LETTER_IDX_BITS;
        remain -= 1;
    }
    out
}

/// Random string of `n` characters in `[a-z]`.
pub fn random_string(n: usize) -> String {
    random_from_bytes(n, alphabets::LOWERCASE)
}

/// Random string of `n` characters in `[0-9]`.
pub fn random_numbers(n: usize) -> String {
    random_from_bytes(n, alphabets::DIGITS)
}

/// Masks emails, phone numbers and names.
/// Keeps characters at byte offsets 0..=1, the last three byte offsets and every `@`.
pub fn partial_obfuscate(s: &str) -> String {
    let len = s.len();
    s.char_indices()
        .map(|(i, c)| {
            if i <= 1 || i + 3 >= len || c == '@' {
                c
            } else {
                '*'
            }
        })
        .collect()
}
