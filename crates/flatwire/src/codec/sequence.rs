// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence strategy: count-prefixed homogeneous collections.
//!
//! Wire form: an `i64` little-endian element count followed by exactly that
//! many encoded elements in iteration order. No terminator, no padding.
//!
//! - The count is narrowed from `usize` with an explicit check; an oversized
//!   length fails with [`Error::LengthOverflow`] before any byte is written.
//! - Decode reads exactly `count` elements. A count claiming more elements than
//!   the source holds is not validated up front; decoding fails at the first
//!   short element read.
//! - Maps are sequences of two-field records: each entry encodes as `(K, V)`.
//! - Text (`str`/`String`) is a sequence of UTF-8 bytes.
//!
//! # Projection
//!
//! [`encode_projected`] transforms each element just before it is written
//! (e.g. to emit one field of a struct). Decode has no counterpart: the
//! reader must decode a sequence of the *projected* type.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::classify::{Classify, Shape};
use super::{Decode, Encode};
use crate::error::{Error, Result};
use crate::transport::{Sink, SinkExt, Source, SourceExt};

/// Encode `items` as a count-prefixed sequence.
pub fn encode_seq<S, I>(sink: &mut S, items: I) -> Result<()>
where
    S: Sink + ?Sized,
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Encode,
{
    encode_projected(sink, items, |item| item)
}

/// Encode `items` as a count-prefixed sequence of `proj(item)`.
pub fn encode_projected<S, I, F, U>(sink: &mut S, items: I, mut proj: F) -> Result<()>
where
    S: Sink + ?Sized,
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    F: FnMut(I::Item) -> U,
    U: Encode,
{
    let iter = items.into_iter();
    let len = iter.len();
    log::trace!("[sequence] encoding {} elements", len);
    sink.put_count(len)?;
    for item in iter {
        proj(item).encode(sink)?;
    }
    Ok(())
}

/// Decode a count-prefixed sequence of `T` into any collection `C`.
pub fn decode_seq<C, T, S>(source: &mut S) -> Result<C>
where
    C: FromIterator<T>,
    T: Decode,
    S: Source + ?Sized,
{
    let len = source.take_count()?;
    log::trace!("[sequence] decoding {} elements", len);
    (0..len).map(|_| T::decode(source)).collect()
}

/// Decode a count-prefixed sequence of `T`, feeding each element into `out`.
///
/// Elements are inserted as they are decoded. On error, `out` keeps the
/// elements decoded before the failure. Returns the element count.
pub fn decode_into<T, E, S>(source: &mut S, out: &mut E) -> Result<usize>
where
    T: Decode,
    E: Extend<T>,
    S: Source + ?Sized,
{
    let len = source.take_count()?;
    log::trace!("[sequence] streaming {} elements", len);
    for _ in 0..len {
        out.extend(Some(T::decode(source)?));
    }
    Ok(len)
}

// ============================================================================
// Slices, arrays, text
// ============================================================================

impl<T> Classify for [T] {
    const SHAPE: Shape = Shape::Sequence;
}

impl<T: Encode> Encode for [T] {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_seq(sink, self)
    }
}

impl<T, const N: usize> Classify for [T; N] {
    const SHAPE: Shape = Shape::Sequence;
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_seq(sink, self)
    }
}

/// Arrays carry a count on the wire like any other sequence; it must equal `N`.
impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        let items: Vec<T> = decode_seq(source)?;
        let found = items.len();
        items
            .try_into()
            .map_err(|_| Error::LengthMismatch { expected: N, found })
    }
}

impl Classify for str {
    const SHAPE: Shape = Shape::Sequence;
}

impl Encode for str {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.put_count(self.len())?;
        sink.put_bytes(self.as_bytes())
    }
}

impl Classify for String {
    const SHAPE: Shape = Shape::Sequence;
}

impl Encode for String {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.as_str().encode(sink)
    }
}

impl Decode for String {
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        let bytes: Vec<u8> = decode_seq(source)?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }
}

// ============================================================================
// Standard collections
// ============================================================================

/// Generate sequence impls for list-like collections (eliminates code duplication)
macro_rules! impl_sequence {
    ($($coll:ident<T $(: $bound:ident $(+ $more:ident)*)?>),* $(,)?) => {
        $(
            impl<T> Classify for $coll<T> {
                const SHAPE: Shape = Shape::Sequence;
            }

            impl<T: Encode> Encode for $coll<T> {
                fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
                    encode_seq(sink, self)
                }
            }

            impl<T: Decode $(+ $bound $(+ $more)*)?> Decode for $coll<T> {
                fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
                    decode_seq(source)
                }
            }
        )*
    };
}

impl_sequence!(
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    BTreeSet<T: Ord>,
    BinaryHeap<T: Ord>,
);

impl<T, H> Classify for HashSet<T, H> {
    const SHAPE: Shape = Shape::Sequence;
}

impl<T: Encode, H> Encode for HashSet<T, H> {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_seq(sink, self)
    }
}

impl<T, H> Decode for HashSet<T, H>
where
    T: Decode + Eq + Hash,
    H: BuildHasher + Default,
{
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        decode_seq(source)
    }
}

impl<K, V> Classify for BTreeMap<K, V> {
    const SHAPE: Shape = Shape::Sequence;
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_seq(sink, self)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        decode_seq::<_, (K, V), _>(source)
    }
}

impl<K, V, H> Classify for HashMap<K, V, H> {
    const SHAPE: Shape = Shape::Sequence;
}

impl<K: Encode, V: Encode, H> Encode for HashMap<K, V, H> {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_seq(sink, self)
    }
}

impl<K, V, H> Decode for HashMap<K, V, H>
where
    K: Decode + Eq + Hash,
    V: Decode,
    H: BuildHasher + Default,
{
    fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
        decode_seq::<_, (K, V), _>(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COUNT_WIDTH;
    use crate::transport::{Cursor, CursorMut};

    /// Iterator that claims more elements than the wire count can express.
    struct Oversized;

    impl Iterator for Oversized {
        type Item = u8;

        fn next(&mut self) -> Option<u8> {
            Some(0)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (usize::MAX, Some(usize::MAX))
        }
    }

    impl ExactSizeIterator for Oversized {}

    struct Row {
        id: u32,
        _weight: f64,
    }

    #[test]
    fn test_vec_wire_layout() {
        let mut out = Vec::new();
        vec![234_i32, 6575, 123, 6868, 1211]
            .encode(&mut out)
            .expect("vec sink");
        assert_eq!(out.len(), COUNT_WIDTH + 5 * 4);
        assert_eq!(&out[..COUNT_WIDTH], &5_i64.to_le_bytes());
        assert_eq!(&out[8..12], &234_i32.to_le_bytes());
    }

    #[test]
    fn test_empty_sequence_is_count_only() {
        let mut out = Vec::new();
        Vec::<u64>::new().encode(&mut out).expect("vec sink");
        assert_eq!(out, vec![0; 8]);
        let back: Vec<u64> = decode_seq(&mut Cursor::new(&out)).expect("decode");
        assert!(back.is_empty());
    }

    #[test]
    fn test_oversized_count_fails_before_writing() {
        let mut out = Vec::new();
        match encode_seq(&mut out, Oversized) {
            Err(Error::LengthOverflow { len }) => assert_eq!(len, usize::MAX),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_projection_writes_projected_elements() {
        let rows = vec![
            Row {
                id: 10,
                _weight: 0.5,
            },
            Row {
                id: 20,
                _weight: 1.5,
            },
        ];
        let mut out = Vec::new();
        encode_projected(&mut out, &rows, |row| row.id).expect("vec sink");
        assert_eq!(out.len(), 8 + 2 * 4);

        // Decode targets the projected element type.
        let ids: Vec<u32> = decode_seq(&mut Cursor::new(&out)).expect("decode");
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_decode_into_appends_to_existing_collection() {
        let mut out = Vec::new();
        vec![3_u16, 4].encode(&mut out).expect("vec sink");

        let mut target = vec![1_u16, 2];
        let n = decode_into::<u16, _, _>(&mut Cursor::new(&out), &mut target).expect("decode");
        assert_eq!(n, 2);
        assert_eq!(target, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_into_keeps_prefix_on_failure() {
        let mut out = Vec::new();
        vec![7_u32, 8, 9].encode(&mut out).expect("vec sink");
        out.truncate(out.len() - 1);

        let mut target: Vec<u32> = Vec::new();
        let err = decode_into::<u32, _, _>(&mut Cursor::new(&out), &mut target).unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(target, vec![7, 8]);
    }

    #[test]
    fn test_count_larger_than_payload_fails_on_first_short_read() {
        let mut out = Vec::new();
        out.extend_from_slice(&1_000_000_i64.to_le_bytes());
        out.extend_from_slice(&1_u32.to_le_bytes());

        let mut src = Cursor::new(&out);
        let err = Vec::<u32>::decode(&mut src).unwrap_err();
        match err {
            Error::EndOfInput { offset, needed } => {
                assert_eq!(offset, 12);
                assert_eq!(needed, 4);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_array_count_must_match() {
        let mut out = Vec::new();
        [1_u8, 2, 3].encode(&mut out).expect("vec sink");
        assert_eq!(out.len(), 8 + 3);

        let ok: [u8; 3] = Decode::decode(&mut Cursor::new(&out)).expect("decode");
        assert_eq!(ok, [1, 2, 3]);

        match <[u8; 4]>::decode(&mut Cursor::new(&out)) {
            Err(Error::LengthMismatch { expected, found }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_text_roundtrip_and_utf8_check() {
        let mut buf = [0u8; 32];
        let mut sink = CursorMut::new(&mut buf);
        "héllo".encode(&mut sink).expect("fits");
        let written = sink.offset();
        assert_eq!(written, 8 + "héllo".len());

        let text = String::decode(&mut Cursor::new(&buf[..written])).expect("valid utf8");
        assert_eq!(text, "héllo");

        let mut bad = Vec::new();
        vec![b'o', b'k', 0xFF].encode(&mut bad).expect("vec sink");
        match String::decode(&mut Cursor::new(&bad)) {
            Err(Error::InvalidUtf8 { valid_up_to }) => assert_eq!(valid_up_to, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_btreemap_entries_are_pair_records() {
        let map: BTreeMap<u8, u16> = [(1, 0x0102), (2, 0x0304)].into_iter().collect();
        let mut out = Vec::new();
        map.encode(&mut out).expect("vec sink");
        assert_eq!(&out[8..], &[1, 0x02, 0x01, 2, 0x04, 0x03]);
    }
}
