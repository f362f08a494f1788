//! compression/codecs/mod.rs
//! Concrete coders that can live in a `CoderPool`.

pub mod zstd;

pub use self::zstd::*;
