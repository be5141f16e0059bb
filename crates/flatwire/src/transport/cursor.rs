// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Slice-backed cursors: [`CursorMut`] writes into a fixed buffer, [`Cursor`]
//! reads from a borrowed byte slice.
//!

use super::{Sink, Source};
use crate::error::{Error, Result};

/// Generate common cursor methods (offset, remaining, capacity)
///
/// Eliminates duplication between CursorMut and Cursor.
macro_rules! impl_cursor_common {
    () => {
        /// Current offset into the buffer.
        pub fn offset(&self) -> usize {
            self.offset
        }

        /// Bytes left between the offset and the end of the buffer.
        pub fn remaining(&self) -> usize {
            self.buffer.len().saturating_sub(self.offset)
        }

        /// Total buffer length.
        pub fn capacity(&self) -> usize {
            self.buffer.len()
        }
    };
}

/// Mutable cursor for writing into a fixed buffer (bounds-checked)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_cursor_common!();

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    /// Consume the cursor, returning the written prefix of the buffer.
    pub fn finish(self) -> &'a [u8] {
        let CursorMut { buffer, offset } = self;
        &buffer[..offset]
    }
}

impl Sink for CursorMut<'_> {
    fn put_bytes(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.remaining() {
            return Err(Error::BufferTooSmall {
                offset: self.offset,
                needed: data.len(),
                capacity: self.buffer.len(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.offset
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_cursor_common!();

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.offset.min(self.buffer.len())..]
    }

    /// Borrow the next `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::EndOfInput {
                offset: self.offset,
                needed: len,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }
}

impl Source for Cursor<'_> {
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let slice = self.read_slice(buf.len())?;
        buf.copy_from_slice(slice);
        Ok(())
    }

    fn position(&self) -> usize {
        self.offset
    }
}
