// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire format constants - single source of truth.
//!
//! The codec has no runtime configuration: the format is purely structural and
//! the reader must know the expected type shape in advance. Everything that
//! fixes the byte layout lives here. **Never hardcode these elsewhere.**
//!
//! # Layout summary
//!
//! | Shape      | Bytes                                              |
//! |------------|----------------------------------------------------|
//! | Primitive  | `size_of::<T>()`, little-endian                    |
//! | Sequence   | [`Count`] (LE, [`COUNT_WIDTH`] bytes) + elements   |
//! | Record     | fields back-to-back, no prefix                     |
//! | Capability | whatever the implementation writes                 |
//! | User hook  | whatever the hook writes                           |
//!
//! There is no header, magic number, version field or checksum.

/// Signed type used for sequence count prefixes on the wire.
///
/// Always 64 bits regardless of host pointer width, so a 32-bit host reads
/// the same bytes a 64-bit host writes.
pub type Count = i64;

/// Width in bytes of a sequence count prefix.
pub const COUNT_WIDTH: usize = core::mem::size_of::<Count>();

/// Largest tuple arity with a record strategy.
pub const MAX_RECORD_ARITY: usize = 12;

/// Byte order of every multi-byte value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// Wire byte order of every primitive and count prefix.
pub const WIRE_ENDIANNESS: Endianness = Endianness::Little;
