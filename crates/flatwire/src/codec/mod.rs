// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec core: static capability dispatch over five shape strategies.
//!
//! # Module Organization
//!
//! - [`classify`] - [`Shape`], [`Classify`] and the decode-hook priority rule
//! - [`primitive`] - fixed-width numbers (little-endian, no header)
//! - [`sequence`] - count-prefixed collections, maps as `(K, V)` records
//! - [`record`] - tuples, field by field, no prefix
//! - [`capability`] - `Encodable`/`Decodable`/`FromSource` roles and user hooks
//!
//! # Dispatch
//!
//! [`Encode`] and [`Decode`] are implemented once per shape. Strategies call
//! back into the same traits for nested values, so a `Vec<(u8, String)>`
//! resolves to sequence -> record -> (primitive, sequence -> primitive) at
//! compile time. There are no runtime type tags.
//!
//! Recursion depth is bounded only by the nesting of the value itself:
//! pathologically deep values (records of records of records...) can exhaust
//! the call stack.

pub mod capability;
pub mod classify;
pub mod primitive;
pub mod record;
pub mod sequence;

pub use capability::{decode_in_place, Decodable, Encodable, FromSource, UserHook};
pub use classify::{classify, Classify, DecodePath, Shape};
pub use primitive::{Family, Primitive};

use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::transport::{Sink, Source};

/// Types that can be written to a [`Sink`].
pub trait Encode: Classify {
    /// Write `self` to `sink` using the strategy selected by [`Classify::SHAPE`].
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()>;
}

/// Types that can be read back from a [`Source`].
///
/// Decoding always materializes a fresh owned value.
pub trait Decode: Classify + Sized {
    /// Read a value of this type from `source`.
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self>;
}

// ============================================================================
// Pointer forwarding: references and smart pointers take the pointee's shape
// ============================================================================

macro_rules! impl_forward_encode {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Classify + ?Sized> Classify for $ptr {
                const SHAPE: Shape = T::SHAPE;
            }

            impl<T: Encode + ?Sized> Encode for $ptr {
                #[inline]
                fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
                    (**self).encode(sink)
                }
            }
        )*
    };
}

impl_forward_encode!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

macro_rules! impl_forward_decode {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Decode> Decode for $ptr<T> {
                #[inline]
                fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
                    T::decode(source).map($ptr::new)
                }
            }
        )*
    };
}

impl_forward_decode!(Box, Rc, Arc);

// ============================================================================
// Entry points
// ============================================================================

/// Encoding front-end owning (or borrowing) a sink.
///
/// # Example
///
/// ```
/// use flatwire::{Decoder, Encoder};
///
/// let mut encoder = Encoder::new(Vec::new());
/// encoder.encode(&(7u8, vec![1i32, 2, 3]))?;
/// let bytes = encoder.into_inner();
///
/// let mut decoder = Decoder::new(flatwire::Cursor::new(&bytes));
/// let value: (u8, Vec<i32>) = decoder.decode()?;
/// assert_eq!(value, (7, vec![1, 2, 3]));
/// # Ok::<(), flatwire::Error>(())
/// ```
#[derive(Debug)]
pub struct Encoder<S> {
    sink: S,
}

impl<S: Sink> Encoder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Encode any value by static dispatch on its shape.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(&mut self.sink)
    }

    /// Encode `items` as a sequence after applying `proj` to each element.
    ///
    /// There is no decode-side projection: read the result back as a
    /// sequence of the projected type.
    pub fn encode_projected<I, F, U>(&mut self, items: I, proj: F) -> Result<()>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(I::Item) -> U,
        U: Encode,
    {
        sequence::encode_projected(&mut self.sink, items, proj)
    }

    /// Bytes written through the sink so far.
    pub fn position(&self) -> usize {
        Sink::position(&self.sink)
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

/// Decoding front-end owning (or borrowing) a source.
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
}

impl<S: Source> Decoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Decode a value of type `T`.
    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        T::decode(&mut self.source)
    }

    /// Decode a count-prefixed run of `T` into an existing collection.
    ///
    /// Returns the number of decoded elements.
    pub fn decode_into<T, E>(&mut self, out: &mut E) -> Result<usize>
    where
        T: Decode,
        E: Extend<T>,
    {
        sequence::decode_into(&mut self.source, out)
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> usize {
        Source::position(&self.source)
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ByteStream, Cursor};

    #[test]
    fn test_encoder_decoder_share_a_stream() {
        let mut stream = ByteStream::new();
        {
            let mut encoder = Encoder::new(&mut stream);
            encoder.encode(&200_u8).expect("encode u8");
            encoder.encode(&(1_i32, 234_i32)).expect("encode pair");
            assert_eq!(encoder.position(), 9);
        }
        let mut decoder = Decoder::new(&mut stream);
        assert_eq!(decoder.decode::<u8>().expect("decode u8"), 200);
        assert_eq!(
            decoder.decode::<(i32, i32)>().expect("decode pair"),
            (1, 234)
        );
        assert_eq!(decoder.position(), 9);
    }

    #[test]
    fn test_smart_pointers_roundtrip() {
        let mut out = Vec::new();
        Box::new(5_u16).encode(&mut out).expect("box");
        Rc::new(6_u16).encode(&mut out).expect("rc");
        Arc::new(7_u16).encode(&mut out).expect("arc");
        (&8_u16).encode(&mut out).expect("ref");
        assert_eq!(out.len(), 8);

        let mut src = Cursor::new(&out);
        assert_eq!(*Box::<u16>::decode(&mut src).expect("box"), 5);
        assert_eq!(*Rc::<u16>::decode(&mut src).expect("rc"), 6);
        assert_eq!(*Arc::<u16>::decode(&mut src).expect("arc"), 7);
        assert_eq!(u16::decode(&mut src).expect("plain"), 8);
    }

    #[test]
    fn test_decoder_into_inner_keeps_position() {
        let bytes = [1u8, 2, 3];
        let mut decoder = Decoder::new(Cursor::new(&bytes));
        decoder.decode::<u8>().expect("decode u8");
        let cursor = decoder.into_inner();
        assert_eq!(cursor.rest(), &[2, 3]);
    }
}
