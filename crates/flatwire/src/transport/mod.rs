// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport abstraction: the byte sink/source contract the codec is written against.
//!
//! The codec core never touches a concrete transport. It only needs:
//!
//! - a [`Sink`] that appends bytes in the order they are issued, and
//! - a [`Source`] that hands back exactly the number of bytes requested, or
//!   fails with [`Error::EndOfInput`](crate::Error::EndOfInput).
//!
//! Both traits are object-safe so capability objects can receive a
//! `&mut dyn Sink` / `&mut dyn Source`. Primitive and count I/O is layered on
//! top through [`SinkExt`] / [`SourceExt`], which are implemented for every
//! sink and source, sized or not.
//!
//! Backends are stateful cursors. Sequential calls consume or produce bytes
//! in call order; the codec never seeks or rewinds. A backend is not meant to
//! be shared between threads: use one instance per unit of work.
//!
//! # Shipped backends
//!
//! | Backend | Role | Storage |
//! |---------|------|---------|
//! | `Vec<u8>` | sink | growable memory |
//! | [`CursorMut`] | sink | fixed `&mut [u8]` |
//! | [`Cursor`] | source | `&[u8]` |
//! | [`ByteStream`] | sink + source | in-memory stream |
//! | [`IoSink`] / [`IoSource`] | sink / source | any `Write` / `Read` |
//! | [`CountingSink`] | sink | none (size only) |

pub mod counting;
pub mod cursor;
pub mod io;
pub mod stream;

pub use counting::CountingSink;
pub use cursor::{Cursor, CursorMut};
pub use io::{IoSink, IoSource};
pub use stream::ByteStream;

use crate::codec::primitive::Primitive;
use crate::config::Count;
use crate::error::{Error, Result};

/// Serializer-role backend: an append-only byte sink.
pub trait Sink {
    /// Append `bytes` to the output.
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Bytes written so far.
    fn position(&self) -> usize;
}

/// Deserializer-role backend: a forward-only byte source.
pub trait Source {
    /// Fill `buf` completely, or fail with [`Error::EndOfInput`].
    ///
    /// A short source must not hand back partially filled or zero-filled data.
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes consumed so far.
    fn position(&self) -> usize;
}

/// Primitive and count writes for any [`Sink`].
pub trait SinkExt: Sink {
    /// Write a primitive in wire byte order.
    fn put<P: Primitive>(&mut self, value: P) -> Result<()> {
        let bytes = value.to_wire();
        debug_assert_eq!(bytes.as_ref().len(), P::WIDTH);
        self.put_bytes(bytes.as_ref())
    }

    /// Write a sequence count prefix.
    ///
    /// Fails with [`Error::LengthOverflow`] before writing anything when `len`
    /// does not fit [`Count`].
    fn put_count(&mut self, len: usize) -> Result<()> {
        let count = narrow_count(len)?;
        self.put(count)
    }
}

impl<S: Sink + ?Sized> SinkExt for S {}

/// Primitive and count reads for any [`Source`].
pub trait SourceExt: Source {
    /// Read a primitive of any family (integer, real or boolean).
    fn take<P: Primitive>(&mut self) -> Result<P> {
        let mut bytes = P::Bytes::default();
        if let Err(err) = self.take_bytes(bytes.as_mut()) {
            log::debug!(
                "[flatwire] {:?} primitive of {} bytes not read at offset {}: {}",
                P::FAMILY,
                P::WIDTH,
                self.position(),
                err
            );
            return Err(err);
        }
        Ok(P::from_wire(bytes))
    }

    /// Read a sequence count prefix and widen it to `usize`.
    fn take_count(&mut self) -> Result<usize> {
        let count: Count = self.take()?;
        usize::try_from(count).map_err(|_| {
            log::debug!("[flatwire] decoded sequence count {} is not a valid length", count);
            Error::InvalidLength(count)
        })
    }
}

impl<S: Source + ?Sized> SourceExt for S {}

/// Bounds-checked `usize` -> [`Count`] conversion.
pub fn narrow_count(len: usize) -> Result<Count> {
    Count::try_from(len).map_err(|_| {
        log::debug!("[flatwire] sequence length {} exceeds the wire count range", len);
        Error::LengthOverflow { len }
    })
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put_bytes(bytes)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).take_bytes(buf)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put_bytes(bytes)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).take_bytes(buf)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

impl Sink for Vec<u8> {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }
}
