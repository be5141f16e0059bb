// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Transport backends: the same value must produce the same bytes everywhere

use flatwire::{
    ByteStream, CountingSink, Cursor, CursorMut, Decoder, Encoder, IoSink, IoSource, Sink, Source,
};
use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Seek, SeekFrom};
use std::thread;

fn sample() -> (u32, Vec<String>, BTreeMap<i16, f64>) {
    let mut map = BTreeMap::new();
    map.insert(-3, 0.125);
    map.insert(8, 1e9);
    (
        0xDEAD_BEEF,
        vec!["one".to_string(), "three".to_string()],
        map,
    )
}

#[test]
fn test_all_sinks_agree() {
    let value = sample();
    let reference = flatwire::to_vec(&value).expect("vec");

    let mut stream = ByteStream::new();
    flatwire::encode(&mut stream, &value).expect("stream");
    assert_eq!(stream.as_bytes(), reference.as_slice());

    let mut buf = vec![0u8; reference.len()];
    let mut fixed = CursorMut::new(&mut buf);
    flatwire::encode(&mut fixed, &value).expect("cursor");
    assert_eq!(fixed.remaining(), 0);
    assert_eq!(fixed.finish(), reference.as_slice());

    let mut io = IoSink::new(Vec::new());
    flatwire::encode(&mut io, &value).expect("io");
    assert_eq!(Sink::position(&io), reference.len());
    assert_eq!(io.into_inner(), reference);

    let mut counter = CountingSink::new();
    flatwire::encode(&mut counter, &value).expect("count");
    assert_eq!(counter.count(), reference.len());
}

#[test]
fn test_file_roundtrip() {
    let value = sample();
    let mut file = tempfile::tempfile().expect("tempfile");

    {
        let mut encoder = Encoder::new(IoSink::new(BufWriter::new(&mut file)));
        encoder.encode(&value).expect("encode");
        encoder.encode(&vec![true, false]).expect("encode");
        encoder.get_mut().flush().expect("flush");
    }

    file.seek(SeekFrom::Start(0)).expect("rewind");
    let mut decoder = Decoder::new(IoSource::new(BufReader::new(&mut file)));
    let back: (u32, Vec<String>, BTreeMap<i16, f64>) = decoder.decode().expect("decode");
    let flags: Vec<bool> = decoder.decode().expect("decode");
    assert_eq!(back, value);
    assert_eq!(flags, vec![true, false]);

    let err = decoder.decode::<u8>().unwrap_err();
    assert!(err.is_end_of_input());
}

#[test]
fn test_io_source_reports_offset_of_short_read() {
    let bytes = flatwire::to_vec(&(1_u32, 2_u32)).expect("encode");
    let mut source = IoSource::new(&bytes[..6]);
    let first: u32 = flatwire::decode(&mut source).expect("first");
    assert_eq!(first, 1);
    match flatwire::decode::<u32, _>(&mut source) {
        Err(flatwire::Error::EndOfInput { offset, needed }) => {
            assert_eq!(offset, 4);
            assert_eq!(needed, 4);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_stream_interleaves_writes_and_reads() {
    let mut stream = ByteStream::new();
    flatwire::encode(&mut stream, &1_u16).expect("encode");
    assert_eq!(flatwire::decode::<u16, _>(&mut stream).expect("decode"), 1);
    flatwire::encode(&mut stream, "two").expect("encode");
    assert_eq!(flatwire::decode::<String, _>(&mut stream).expect("decode"), "two");
    assert_eq!(stream.remaining(), 0);
    assert_eq!(Source::position(&stream), Sink::position(&stream));
}

#[test]
fn test_boxed_dyn_backends() {
    let mut sink: Box<dyn Sink> = Box::new(Vec::new());
    flatwire::encode(&mut sink, &(9_u8, -9_i8)).expect("encode");
    assert_eq!(sink.position(), 2);

    let bytes = [9u8, 0xF7];
    let mut source: Box<dyn Source + '_> = Box::new(Cursor::new(&bytes));
    let pair: (u8, i8) = flatwire::decode(&mut source).expect("decode");
    assert_eq!(pair, (9, -9));
}

#[test]
fn test_one_backend_per_thread() {
    let handles: Vec<_> = (0..4_u32)
        .map(|worker| {
            thread::spawn(move || {
                let values: Vec<u32> = (0..100).map(|i| i * worker).collect();
                let bytes = flatwire::to_vec(&values).expect("encode");
                let back: Vec<u32> = flatwire::from_slice(&bytes).expect("decode");
                assert_eq!(back, values);
                bytes.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), 8 + 100 * 4);
    }
}
