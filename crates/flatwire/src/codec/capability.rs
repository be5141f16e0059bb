// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Capability roles and user hooks.
//!
//! Three object-safe roles let a type take over its own wire form:
//!
//! - [`Encodable`]: write `self` to a `&mut dyn Sink`.
//! - [`Decodable`]: overwrite an existing value from a `&mut dyn Source`
//!   (decode *after* construction).
//! - [`FromSource`]: build a fresh value from a `&mut dyn Source`
//!   (decode *during* construction).
//!
//! A trait object `dyn Encodable` is itself encodable and classifies as
//! [`Shape::Capability`]. A concrete type becomes a first-class codec value
//! (usable inside sequences and records) by bridging its roles into
//! [`Encode`]/[`Decode`] with [`codec_hooks!`](crate::codec_hooks) or
//! `#[derive(Codec)]`; it then classifies as [`Shape::UserHook`].
//!
//! When a type offers both decode roles, [`FromSource`] is used
//! (see [`DecodePath::resolve`]).

use super::classify::{Classify, DecodePath, Shape};
use super::Encode;
use crate::error::Result;
use crate::transport::{Sink, Source};

/// A value that writes itself to a byte sink.
pub trait Encodable {
    fn encode_to(&self, sink: &mut dyn Sink) -> Result<()>;
}

/// A value that can be filled in from a byte source after construction.
pub trait Decodable {
    fn decode_from(&mut self, source: &mut dyn Source) -> Result<()>;
}

/// A value constructed directly from a byte source.
pub trait FromSource: Sized {
    fn from_source(source: &mut dyn Source) -> Result<Self>;
}

/// A type that bridges its own roles into [`Encode`] and/or [`Decode`].
///
/// Implemented by [`codec_hooks!`](crate::codec_hooks) and `#[derive(Codec)]`.
/// A type may bridge either role or both.
pub trait UserHook {
    /// Decode hook selected by [`DecodePath::resolve`]; `None` for encode-only types.
    const DECODE_PATH: Option<DecodePath>;
}

impl Classify for dyn Encodable + '_ {
    const SHAPE: Shape = Shape::Capability;
}

impl Encode for dyn Encodable + '_ {
    fn encode<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        encode_dyn(self, sink)
    }
}

impl Classify for dyn Decodable + '_ {
    const SHAPE: Shape = Shape::Capability;
}

/// Run `value`'s [`Encodable`] hook against any sink.
pub fn encode_dyn<T, S>(value: &T, sink: &mut S) -> Result<()>
where
    T: Encodable + ?Sized,
    S: Sink + ?Sized,
{
    let mut sink = sink;
    value.encode_to(&mut sink)
}

/// Decode into an existing object through its [`Decodable`] hook.
pub fn decode_in_place<S: Source + ?Sized>(source: &mut S, target: &mut dyn Decodable) -> Result<()> {
    let mut source = source;
    target.decode_from(&mut source)
}

/// Build-time check that a bridged decode function matches `DECODE_PATH`.
trait PathCheck: UserHook {
    const DURING: () = assert!(
        matches!(Self::DECODE_PATH, Some(DecodePath::DuringConstruct)),
        "decode_during used on a type whose decode path is not DuringConstruct"
    );
    const AFTER: () = assert!(
        matches!(Self::DECODE_PATH, Some(DecodePath::AfterConstruct)),
        "decode_after used on a type whose decode path is not AfterConstruct"
    );
}

impl<T: UserHook + ?Sized> PathCheck for T {}

/// Decode-during-construction path.
pub fn decode_during<T, S>(source: &mut S) -> Result<T>
where
    T: FromSource + UserHook,
    S: Source + ?Sized,
{
    #[allow(clippy::let_unit_value)]
    let () = <T as PathCheck>::DURING;
    let mut source = source;
    T::from_source(&mut source)
}

/// Decode-after-construction path: default-construct, then fill in.
pub fn decode_after<T, S>(source: &mut S) -> Result<T>
where
    T: Default + Decodable + UserHook,
    S: Source + ?Sized,
{
    #[allow(clippy::let_unit_value)]
    let () = <T as PathCheck>::AFTER;
    let mut value = T::default();
    decode_in_place(source, &mut value)?;
    Ok(value)
}

#[doc(hidden)]
pub const fn require_decodable<T: Decodable + ?Sized>() {}

/// Bridge a type's roles into [`Encode`](crate::Encode)/[`Decode`](crate::Decode).
///
/// List the roles the type implements, in any order:
///
/// - `encodable` - encode through [`Encodable`]
/// - `from_source` - decode through [`FromSource`]
/// - `decodable` - decode through `Default` + [`Decodable`]
///
/// A type listing both decode roles decodes through [`FromSource`].
/// Roles that are not listed get no bridge, so an encode-only type has no
/// `Decode` impl and a decode-only type has no `Encode` impl.
///
/// ```
/// use flatwire::{codec_hooks, Encodable, FromSource, Sink, Source, SinkExt, SourceExt};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(i16);
///
/// impl Encodable for Celsius {
///     fn encode_to(&self, sink: &mut dyn Sink) -> flatwire::Result<()> {
///         sink.put(self.0)
///     }
/// }
///
/// impl FromSource for Celsius {
///     fn from_source(source: &mut dyn Source) -> flatwire::Result<Self> {
///         source.take().map(Celsius)
///     }
/// }
///
/// codec_hooks!(Celsius: encodable, from_source);
///
/// let bytes = flatwire::to_vec(&vec![Celsius(-5), Celsius(21)])?;
/// let back: Vec<Celsius> = flatwire::from_slice(&bytes)?;
/// assert_eq!(back, vec![Celsius(-5), Celsius(21)]);
/// # Ok::<(), flatwire::Error>(())
/// ```
///
/// Generic types should use `#[derive(Codec)]` instead.
#[macro_export]
macro_rules! codec_hooks {
    (@roles $ty:ty, [$enc:tt $fs:tt $dec:tt], encodable $($rest:ident)*) => {
        $crate::codec_hooks!(@roles $ty, [true $fs $dec], $($rest)*);
    };
    (@roles $ty:ty, [$enc:tt $fs:tt $dec:tt], from_source $($rest:ident)*) => {
        $crate::codec_hooks!(@roles $ty, [$enc true $dec], $($rest)*);
    };
    (@roles $ty:ty, [$enc:tt $fs:tt $dec:tt], decodable $($rest:ident)*) => {
        $crate::codec_hooks!(@roles $ty, [$enc $fs true], $($rest)*);
    };
    (@roles $ty:ty, [$enc:tt $fs:tt $dec:tt],) => {
        impl $crate::UserHook for $ty {
            const DECODE_PATH: ::core::option::Option<$crate::DecodePath> =
                $crate::DecodePath::resolve($fs, $dec);
        }

        impl $crate::Classify for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::UserHook;
        }

        $crate::codec_hooks!(@encode $ty, $enc);
        $crate::codec_hooks!(@decode $ty, $fs, $dec);
    };
    (@encode $ty:ty, true) => {
        impl $crate::Encode for $ty {
            fn encode<S: $crate::Sink + ?Sized>(&self, sink: &mut S) -> $crate::Result<()> {
                $crate::codec::capability::encode_dyn(self, sink)
            }
        }
    };
    (@encode $ty:ty, false) => {};
    (@decode $ty:ty, true, $dec:tt) => {
        $crate::codec_hooks!(@check $ty, $dec);
        impl $crate::Decode for $ty {
            fn decode<S: $crate::Source + ?Sized>(source: &mut S) -> $crate::Result<Self> {
                $crate::codec::capability::decode_during(source)
            }
        }
    };
    (@decode $ty:ty, false, true) => {
        impl $crate::Decode for $ty {
            fn decode<S: $crate::Source + ?Sized>(source: &mut S) -> $crate::Result<Self> {
                $crate::codec::capability::decode_after(source)
            }
        }
    };
    (@decode $ty:ty, false, false) => {};
    (@check $ty:ty, true) => {
        const _: () = $crate::codec::capability::require_decodable::<$ty>();
    };
    (@check $ty:ty, false) => {};
    ($ty:ty : $($role:ident),+ $(,)?) => {
        $crate::codec_hooks!(@roles $ty, [false false false], $($role)+);
    };
}
