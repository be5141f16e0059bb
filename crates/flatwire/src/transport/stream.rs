// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory byte stream that is both a [`Sink`] and a [`Source`].
//!
//! Writes append at the tail, reads consume from an independent read position,
//! so a value can be encoded and decoded through the same stream.

use super::{Sink, Source};
use crate::error::{Error, Result};

/// Growable read/write byte stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteStream {
    data: Vec<u8>,
    read_pos: usize,
}

impl ByteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            read_pos: 0,
        }
    }

    /// Total bytes written (the write position).
    pub fn written(&self) -> usize {
        self.data.len()
    }

    /// Total bytes read (the read position).
    pub fn consumed(&self) -> usize {
        self.read_pos
    }

    /// Bytes written but not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_pos
    }

    /// Everything written so far, read or not.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Unread bytes.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.read_pos..]
    }

    /// Drop all content and reset both positions.
    pub fn clear(&mut self) {
        self.data.clear();
        self.read_pos = 0;
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(data: Vec<u8>) -> Self {
        Self { data, read_pos: 0 }
    }
}

impl Sink for ByteStream {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> usize {
        self.written()
    }
}

impl Source for ByteStream {
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > self.remaining() {
            return Err(Error::EndOfInput {
                offset: self.read_pos,
                needed: buf.len(),
            });
        }
        buf.copy_from_slice(&self.data[self.read_pos..self.read_pos + buf.len()]);
        self.read_pos += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.consumed()
    }
}
