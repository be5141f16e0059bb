// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Size-only sink, used to pre-size fixed buffers before encoding.

use super::Sink;
use crate::error::Result;

/// Sink that discards bytes and only counts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Sink for CountingSink {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.count += bytes.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.count
    }
}
