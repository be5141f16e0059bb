// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `std::io` adapters: any `Write` becomes a [`Sink`], any `Read` a [`Source`].
//!
//! Files, sockets and pipes plug into the codec through these wrappers. Writes
//! and reads block for as long as the underlying call does; there are no
//! timeouts or retries at this layer. Wrap the inner stream in a
//! `BufWriter`/`BufReader` when it is unbuffered.

use std::io::{ErrorKind, Read, Write};

use super::{Sink, Source};
use crate::error::{Error, Result};

/// Serializer-role backend over any [`Write`].
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    written: usize,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| {
            log::debug!("[IoSink] flush failed after {} bytes: {}", self.written, e);
            Error::Io(e)
        })
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(|e| {
            log::debug!("[IoSink] write failed at offset {}: {}", self.written, e);
            Error::Io(e)
        })?;
        self.written += bytes.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.written
    }
}

/// Deserializer-role backend over any [`Read`].
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    consumed: usize,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for IoSource<R> {
    fn take_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.consumed += buf.len();
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                log::debug!(
                    "[IoSource] end of input at offset {} ({} bytes requested)",
                    self.consumed,
                    buf.len()
                );
                Err(Error::EndOfInput {
                    offset: self.consumed,
                    needed: buf.len(),
                })
            }
            Err(e) => {
                log::debug!("[IoSource] read failed at offset {}: {}", self.consumed, e);
                Err(Error::Io(e))
            }
        }
    }

    fn position(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::transport::{SinkExt, SourceExt};

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "connection lost"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_roundtrip_through_memory() {
        let mut sink = IoSink::new(Vec::new());
        sink.put(0xDEAD_BEEF_u32).expect("write to vec");
        sink.put(-0.5_f64).expect("write to vec");
        assert_eq!(sink.position(), 12);

        let bytes = sink.into_inner();
        let mut source = IoSource::new(bytes.as_slice());
        assert_eq!(source.take::<u32>().expect("read u32"), 0xDEAD_BEEF);
        assert_eq!(source.take::<f64>().expect("read f64"), -0.5);
        assert_eq!(source.position(), 12);
    }

    #[test]
    fn test_io_source_maps_eof_to_end_of_input() {
        let bytes = [1u8, 2, 3];
        let mut source = IoSource::new(&bytes[..]);
        let err = source.take::<u64>().unwrap_err();
        assert!(err.is_end_of_input());
    }

    #[test]
    fn test_io_sink_propagates_backend_failure() {
        let mut sink = IoSink::new(FailingWriter);
        let err = sink.put(1_u8).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert_eq!(sink.position(), 0);
    }
}
