// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive strategy: fixed-width numbers written verbatim in little-endian order.
//!
//! No length prefix, no type tag. Byte order follows
//! [`WIRE_ENDIANNESS`](crate::config::WIRE_ENDIANNESS); the std
//! `to_le_bytes`/`to_be_bytes` conversions swap on hosts whose native order
//! differs, so every host produces the same bytes. Only fixed-width arithmetic types qualify: `usize` and
//! `isize` are excluded because their width depends on the host.

use super::classify::{Classify, Shape};
use super::{Decode, Encode};
use crate::config::{Endianness, WIRE_ENDIANNESS};
use crate::error::Result;
use crate::transport::{Sink, SinkExt, Source, SourceExt};

mod sealed {
    pub trait Sealed {}
}

/// Primitive families a source must be able to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Integer,
    Real,
    Boolean,
}

/// A fixed-width arithmetic type with a fixed-order wire form.
///
/// Sealed: the set of primitives is closed.
pub trait Primitive: sealed::Sealed + Copy + 'static {
    /// Encoded width in bytes (`size_of::<Self>()`).
    const WIDTH: usize;
    const FAMILY: Family;

    /// Byte array of length [`WIDTH`](Self::WIDTH).
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Wire byte pattern of `self`.
    fn to_wire(self) -> Self::Bytes;

    /// Inverse of [`to_wire`](Self::to_wire).
    fn from_wire(bytes: Self::Bytes) -> Self;
}

/// Generate `Primitive` + codec impls for numeric types (eliminates code duplication)
macro_rules! impl_primitive {
    ($family:ident => $($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();
                const FAMILY: Family = Family::$family;
                type Bytes = [u8; core::mem::size_of::<$ty>()];

                #[inline]
                fn to_wire(self) -> Self::Bytes {
                    match WIRE_ENDIANNESS {
                        Endianness::Little => self.to_le_bytes(),
                        Endianness::Big => self.to_be_bytes(),
                    }
                }

                #[inline]
                fn from_wire(bytes: Self::Bytes) -> Self {
                    match WIRE_ENDIANNESS {
                        Endianness::Little => <$ty>::from_le_bytes(bytes),
                        Endianness::Big => <$ty>::from_be_bytes(bytes),
                    }
                }
            }

            impl Classify for $ty {
                const SHAPE: Shape = Shape::Primitive;
            }

            impl Encode for $ty {
                #[inline]
                fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
                    sink.put(*self)
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
                    source.take()
                }
            }
        )*
    };
}

impl_primitive!(Integer => u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);
impl_primitive!(Real => f32, f64);

impl sealed::Sealed for bool {}

/// One byte: `0` is false, anything else decodes as true.
impl Primitive for bool {
    const WIDTH: usize = 1;
    const FAMILY: Family = Family::Boolean;
    type Bytes = [u8; 1];

    #[inline]
    fn to_wire(self) -> Self::Bytes {
        [u8::from(self)]
    }

    #[inline]
    fn from_wire(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }
}

impl Classify for bool {
    const SHAPE: Shape = Shape::Primitive;
}

impl Encode for bool {
    #[inline]
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.put(*self)
    }
}

impl Decode for bool {
    #[inline]
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        source.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Cursor;

    fn wire<P: Primitive>(value: P) -> Vec<u8> {
        value.to_wire().as_ref().to_vec()
    }

    #[test]
    fn test_wire_bytes_have_declared_width() {
        fn check<P: Primitive>(value: P) {
            assert_eq!(wire(value).len(), P::WIDTH);
        }
        check(0_u8);
        check(0_i16);
        check(0.0_f32);
        check(0_u64);
        check(0_i128);
        check(false);
    }

    #[test]
    fn test_widths_match_size_of() {
        assert_eq!(<u8 as Primitive>::WIDTH, 1);
        assert_eq!(<i16 as Primitive>::WIDTH, 2);
        assert_eq!(<f32 as Primitive>::WIDTH, 4);
        assert_eq!(<u64 as Primitive>::WIDTH, 8);
        assert_eq!(<i128 as Primitive>::WIDTH, 16);
        assert_eq!(<bool as Primitive>::WIDTH, 1);
    }

    #[test]
    fn test_families() {
        assert_eq!(<i32 as Primitive>::FAMILY, Family::Integer);
        assert_eq!(<f64 as Primitive>::FAMILY, Family::Real);
        assert_eq!(<bool as Primitive>::FAMILY, Family::Boolean);
    }

    #[test]
    fn test_wire_bytes_are_little_endian() {
        assert_eq!(wire(40258_u16), vec![0x42, 0x9D]);
        assert_eq!(wire(123456_u32), vec![0x40, 0xE2, 0x01, 0x00]);
        assert_eq!(wire(-2_i16), vec![0xFE, 0xFF]);
        assert_eq!(wire(1.0_f32), vec![0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(wire(true), vec![1]);
    }

    #[test]
    fn test_extremes_roundtrip() {
        let mut out = Vec::new();
        u64::MAX.encode(&mut out).expect("vec sink");
        i64::MIN.encode(&mut out).expect("vec sink");
        u128::MAX.encode(&mut out).expect("vec sink");
        f64::NEG_INFINITY.encode(&mut out).expect("vec sink");
        f32::MIN_POSITIVE.encode(&mut out).expect("vec sink");

        let mut src = Cursor::new(&out);
        assert_eq!(u64::decode(&mut src).expect("u64"), u64::MAX);
        assert_eq!(i64::decode(&mut src).expect("i64"), i64::MIN);
        assert_eq!(u128::decode(&mut src).expect("u128"), u128::MAX);
        assert_eq!(f64::decode(&mut src).expect("f64"), f64::NEG_INFINITY);
        assert_eq!(f32::decode(&mut src).expect("f32"), f32::MIN_POSITIVE);
        assert!(src.is_eof());
    }

    #[test]
    fn test_nan_bit_pattern_is_preserved() {
        let nan = f64::from_bits(0x7FF8_0000_0000_0001);
        let mut out = Vec::new();
        nan.encode(&mut out).expect("vec sink");
        let back = f64::decode(&mut Cursor::new(&out)).expect("f64");
        assert_eq!(back.to_bits(), nan.to_bits());
    }

    #[test]
    fn test_nonzero_byte_decodes_as_true() {
        let bytes = [0u8, 1, 7];
        let mut src = Cursor::new(&bytes);
        assert!(!bool::decode(&mut src).expect("bool"));
        assert!(bool::decode(&mut src).expect("bool"));
        assert!(bool::decode(&mut src).expect("bool"));
    }

    #[test]
    fn test_truncated_primitive_is_end_of_input() {
        let bytes = [0u8; 7];
        let err = u64::decode(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(err.is_end_of_input());
    }
}
