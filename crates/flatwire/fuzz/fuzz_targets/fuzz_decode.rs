// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, HashSet};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must decode or fail with a typed error, never panic.
    let _ = flatwire::from_slice::<Vec<u64>>(data);
    let _ = flatwire::from_slice::<String>(data);
    let _ = flatwire::from_slice::<BTreeMap<i32, Vec<u8>>>(data);
    let _ = flatwire::from_slice::<HashSet<i16>>(data);
    let _ = flatwire::from_slice::<(u8, [f32; 3], bool, Vec<(i8, String)>)>(data);

    // Anything that decodes re-encodes to the same bytes.
    if let Ok(value) = flatwire::from_slice::<Vec<(u16, String)>>(data) {
        let bytes = flatwire::to_vec(&value).expect("re-encode");
        assert_eq!(bytes.as_slice(), data);
    }
});
