// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for flatwire encode/decode operations.
//!
//! Every failure is returned to the immediate caller; the codec never retries
//! and never swallows an error. After a failed decode the source position is
//! unspecified and the backend should be discarded.

use std::fmt;

/// Result type for flatwire operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by the codec and its transport backends.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A decode asked for more bytes than the source can supply.
    EndOfInput {
        /// Source position at which the short read started.
        offset: usize,
        /// Bytes requested by the read.
        needed: usize,
    },

    // ========================================================================
    // Narrowing Errors
    // ========================================================================
    /// A sequence length does not fit the signed 64-bit wire count.
    LengthOverflow {
        /// True element count of the sequence.
        len: usize,
    },
    /// A decoded count is negative or exceeds the platform's `usize`.
    InvalidLength(i64),

    // ========================================================================
    // Malformed Data
    // ========================================================================
    /// A fixed-size target received a count different from its length.
    LengthMismatch { expected: usize, found: usize },
    /// Decoded text bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },
    /// A whole-buffer decode left bytes unread.
    TrailingBytes { remaining: usize },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// A fixed-capacity sink has no room for the write.
    BufferTooSmall {
        offset: usize,
        needed: usize,
        capacity: usize,
    },
    /// The underlying I/O stream reported a fault.
    Io(std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source ran out of bytes.
    EndOfInput,
    /// A count could not be converted between the wire width and `usize`.
    Narrowing,
    /// The bytes decoded but do not form a valid value of the target type.
    Malformed,
    /// The transport itself failed.
    Backend,
}

impl Error {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::EndOfInput { .. } => ErrorCategory::EndOfInput,
            Error::LengthOverflow { .. } | Error::InvalidLength(_) => ErrorCategory::Narrowing,
            Error::LengthMismatch { .. } | Error::InvalidUtf8 { .. } | Error::TrailingBytes { .. } => {
                ErrorCategory::Malformed
            }
            Error::BufferTooSmall { .. } | Error::Io(_) => ErrorCategory::Backend,
        }
    }

    /// True when the error means the source was exhausted.
    pub fn is_end_of_input(&self) -> bool {
        self.category() == ErrorCategory::EndOfInput
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EndOfInput { offset, needed } => {
                write!(f, "unexpected end of input at offset {}: needed {} bytes", offset, needed)
            }
            Error::LengthOverflow { len } => {
                write!(f, "sequence length {} does not fit the i64 wire count", len)
            }
            Error::InvalidLength(count) => write!(f, "invalid sequence count {}", count),
            Error::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {} elements, found {}", expected, found)
            }
            Error::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 after {} valid bytes", valid_up_to)
            }
            Error::TrailingBytes { remaining } => {
                write!(f, "{} trailing bytes after decoded value", remaining)
            }
            Error::BufferTooSmall {
                offset,
                needed,
                capacity,
            } => write!(
                f,
                "buffer too small: write of {} bytes at offset {} exceeds capacity {}",
                needed, offset, capacity
            ),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
