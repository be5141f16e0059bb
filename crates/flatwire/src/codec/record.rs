// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record strategy: tuples written field by field, in declaration order.
//!
//! A record has no prefix of its own; its encoding is the concatenation of
//! its fields' encodings. Arities `0..=12` are supported (see
//! [`MAX_RECORD_ARITY`](crate::config::MAX_RECORD_ARITY)); the unit tuple
//! encodes to nothing.

use super::classify::{Classify, Shape};
use super::{Decode, Encode};
use crate::error::Result;
use crate::transport::{Sink, Source};

macro_rules! impl_record {
    ($($name:ident),*) => {
        impl<$($name),*> Classify for ($($name,)*) {
            const SHAPE: Shape = Shape::Record;
        }

        impl<$($name: Encode),*> Encode for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
                let ($($name,)*) = self;
                $($name.encode(sink)?;)*
                Ok(())
            }
        }

        impl<$($name: Decode),*> Decode for ($($name,)*) {
            #[allow(unused_variables)]
            fn decode<S: Source + ?Sized>(source: &mut S) -> Result<Self> {
                // Tuple expressions evaluate left to right: fields decode in order.
                Ok(($($name::decode(source)?,)*))
            }
        }
    };
}

impl_record!();
impl_record!(A);
impl_record!(A, B);
impl_record!(A, B, C);
impl_record!(A, B, C, D);
impl_record!(A, B, C, D, E);
impl_record!(A, B, C, D, E, F);
impl_record!(A, B, C, D, E, F, G);
impl_record!(A, B, C, D, E, F, G, H);
impl_record!(A, B, C, D, E, F, G, H, I);
impl_record!(A, B, C, D, E, F, G, H, I, J);
impl_record!(A, B, C, D, E, F, G, H, I, J, K);
impl_record!(A, B, C, D, E, F, G, H, I, J, K, L);
