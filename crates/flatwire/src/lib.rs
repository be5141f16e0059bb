// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # flatwire - Static-dispatch binary codec
//!
//! Turns in-memory values into a compact little-endian byte stream and back.
//! The encoding strategy for each type is chosen at compile time from its
//! shape; there are no runtime type tags, no schema and no field names on the
//! wire.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let mut scores = BTreeMap::new();
//! scores.insert(1_i32, 90_i32);
//! scores.insert(2, 75);
//!
//! let bytes = flatwire::to_vec(&scores)?;
//! assert_eq!(bytes.len(), 8 + 2 * (4 + 4));
//!
//! let back: BTreeMap<i32, i32> = flatwire::from_slice(&bytes)?;
//! assert_eq!(back, scores);
//! # Ok::<(), flatwire::Error>(())
//! ```
//!
//! ## Wire Format
//!
//! | Shape | Encoding |
//! |-------|----------|
//! | Primitive | `size_of::<T>()` bytes, little-endian |
//! | Sequence | `i64` LE count, then each element |
//! | Record (tuple) | each field in order, no prefix |
//! | Capability / UserHook | whatever the type's hook writes |
//!
//! Maps are sequences of `(key, value)` records. Text is a sequence of UTF-8
//! bytes. The format is not self-describing: the reader must know the type.
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |   encode / decode / Encoder / Decoder  (entry points)               |
//! +---------------------------------------------------------------------+
//! |   Classify -> Shape  (compile-time strategy selection)              |
//! |   primitive | sequence | record | capability | user hook            |
//! +---------------------------------------------------------------------+
//! |   Sink / Source  (transport contract)                               |
//! |   Vec<u8> | CursorMut | Cursor | ByteStream | IoSink/IoSource       |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`codec`] - shape classification and the five strategies
//! - [`transport`] - `Sink`/`Source` contract and shipped backends
//! - [`config`] - wire constants
//! - [`error`] - error type and categories
//!
//! ## User Types
//!
//! Structs opt in with `#[derive(Codec)]`, or by implementing the
//! [`Encodable`] / [`FromSource`] / [`Decodable`] roles by hand and bridging
//! them with [`codec_hooks!`].
//!
//! ```rust
//! use flatwire::Codec;
//!
//! #[derive(Codec, Debug, PartialEq)]
//! struct Reading {
//!     sensor: u16,
//!     values: Vec<f32>,
//! }
//!
//! let r = Reading { sensor: 3, values: vec![0.5, 1.5] };
//! let bytes = flatwire::to_vec(&r)?;
//! assert_eq!(flatwire::from_slice::<Reading>(&bytes)?, r);
//! # Ok::<(), flatwire::Error>(())
//! ```

// Allow the derive's `::flatwire::` paths inside this crate.
extern crate self as flatwire;

pub mod codec;
pub mod config;
pub mod error;
pub mod transport;

pub use codec::{
    classify, decode_in_place, Classify, Decodable, Decode, DecodePath, Decoder, Encodable, Encode,
    Encoder, Family, FromSource, Primitive, Shape, UserHook,
};
pub use error::{Error, ErrorCategory, Result};
pub use transport::{
    ByteStream, CountingSink, Cursor, CursorMut, IoSink, IoSource, Sink, SinkExt, Source,
    SourceExt,
};

/// `#[derive(Codec)]`: bridge a struct into the user-hook shape.
pub use flatwire_codegen::Codec;

/// Encode `value` into `sink`.
pub fn encode<T, S>(sink: &mut S, value: &T) -> Result<()>
where
    T: Encode + ?Sized,
    S: Sink + ?Sized,
{
    value.encode(sink)
}

/// Decode a value of type `T` from `source`.
pub fn decode<T, S>(source: &mut S) -> Result<T>
where
    T: Decode,
    S: Source + ?Sized,
{
    T::decode(source)
}

/// Decode a count-prefixed sequence of `T` into an existing collection.
///
/// Elements are inserted one at a time as they are decoded; on error the
/// collection keeps what was decoded before the failure. Returns the number
/// of elements read.
pub fn decode_into<T, E, S>(source: &mut S, out: &mut E) -> Result<usize>
where
    T: Decode,
    E: Extend<T>,
    S: Source + ?Sized,
{
    codec::sequence::decode_into(source, out)
}

/// Encode `value` into a fresh byte vector.
///
/// Each hook runs once; use [`encoded_len`] first when an exact capacity is
/// worth a second pass.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    value.encode(&mut out)?;
    Ok(out)
}

/// Decode a `T` that spans exactly the whole of `bytes`.
///
/// Fails with [`Error::TrailingBytes`] if the value ends before the buffer does.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    let value = T::decode(&mut cursor)?;
    if !cursor.is_eof() {
        log::debug!(
            "[flatwire] {} trailing bytes after decode at offset {}",
            cursor.remaining(),
            cursor.offset()
        );
        return Err(Error::TrailingBytes {
            remaining: cursor.remaining(),
        });
    }
    Ok(value)
}

/// Number of bytes `value` encodes to.
pub fn encoded_len<T: Encode + ?Sized>(value: &T) -> Result<usize> {
    let mut counter = CountingSink::new();
    value.encode(&mut counter)?;
    Ok(counter.count())
}
