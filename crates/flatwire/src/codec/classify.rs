// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape classification: the static decision that picks a strategy for a type.
//!
//! Every codec type carries exactly one [`Classify`] impl, which is a supertrait
//! of both [`Encode`](super::Encode) and [`Decode`](super::Decode). A type
//! therefore resolves to the same [`Shape`] in both directions, and a type with
//! no impl is rejected at compile time.
//!
//! # Precedence
//!
//! When a type could structurally fit several shapes, it takes the most
//! specific one it opts into:
//!
//! ```text
//! UserHook > Capability > Record > Sequence > Primitive
//! ```
//!
//! Coherence enforces the "exactly one" half of the rule: a type bridged with
//! [`codec_hooks!`](crate::codec_hooks) or `#[derive(Codec)]` cannot also pick
//! up a sequence or record impl.

/// The five mutually exclusive value shapes.
///
/// Declaration order is precedence order: the derived `Ord` ranks
/// `UserHook` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    /// Fixed-width number or boolean, written verbatim in little-endian order.
    Primitive,
    /// Homogeneous collection, written as a count followed by its elements.
    Sequence,
    /// Fixed-arity tuple, written field by field with no prefix.
    Record,
    /// Value reached through the `Encodable`/`Decodable` object roles.
    Capability,
    /// User type with its own encode and decode hooks.
    UserHook,
}

/// Static shape of a codec type.
pub trait Classify {
    const SHAPE: Shape;
}

/// Shape of `T`, decided at compile time.
pub const fn classify<T: Classify + ?Sized>() -> Shape {
    T::SHAPE
}

/// How a user type is materialized on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePath {
    /// The type is built directly from the source (`FromSource`).
    DuringConstruct,
    /// The type is default-constructed, then filled in (`Default + Decodable`).
    AfterConstruct,
}

impl DecodePath {
    /// Priority rule between the two decode hooks.
    ///
    /// Construct-from-source wins whenever it is available, since it never
    /// exposes a half-initialized value. Returns `None` when the type offers
    /// neither hook.
    pub const fn resolve(from_source: bool, decodable: bool) -> Option<DecodePath> {
        match (from_source, decodable) {
            (true, _) => Some(DecodePath::DuringConstruct),
            (false, true) => Some(DecodePath::AfterConstruct),
            (false, false) => None,
        }
    }

}
