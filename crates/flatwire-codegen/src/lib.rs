// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Generics, Index, Member};

/// Decode hooks requested on the container.
#[derive(Clone, Copy)]
struct DecodeHooks {
    from_source: bool,
    after_construct: bool,
    encode_only: bool,
}

/// One struct field as seen by the generated code.
struct FieldInfo {
    member: Member,
    skip: bool,
}

/// `#[derive(Codec)]` macro: generates the hook roles plus `Encode`/`Decode`.
///
/// Non-skipped fields are written in declaration order, each with its own
/// shape. The struct classifies as `Shape::UserHook`.
///
/// Container attributes:
/// - `#[codec(from_source)]` (default) - decode by constructing from the source
/// - `#[codec(after_construct)]` - decode into `Self::default()`; requires `Default`
/// - both - both hooks are generated; decoding constructs from the source
/// - `#[codec(encode_only)]` - no decode hook and no `Decode` impl; fits types
///   that borrow their data or have no `Default`
///
/// Field attributes:
/// - `#[codec(skip)]` - not on the wire; decodes as `Default::default()`
///
/// Example:
/// ```ignore
/// use flatwire::Codec;
///
/// #[derive(Codec)]
/// struct Sample {
///     id: u32,
///     payload: Vec<u8>,
///     #[codec(skip)]
///     cache: Option<usize>,
/// }
/// ```
#[proc_macro_derive(Codec, attributes(codec))]
pub fn derive_codec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Codec cannot be derived for enums: the wire format has no variant tag",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Codec cannot be derived for unions",
            ))
        }
    };

    let hooks = parse_container_attrs(input)?;
    let field_infos = collect_fields(fields)?;

    let name = &input.ident;
    let encode_generics = with_bound(&input.generics, quote!(::flatwire::Encode));
    let decode_generics = with_bound(&input.generics, quote!(::flatwire::Decode));
    let (enc_impl, ty_generics, enc_where) = encode_generics.split_for_impl();
    let (dec_impl, _, dec_where) = decode_generics.split_for_impl();
    let (plain_impl, _, plain_where) = input.generics.split_for_impl();

    let encode_fields = field_infos.iter().filter(|f| !f.skip).map(|f| {
        let member = &f.member;
        quote! { ::flatwire::Encode::encode(&self.#member, &mut *sink)?; }
    });

    let from_source_impl = if hooks.from_source {
        let init = field_infos.iter().map(|f| {
            let member = &f.member;
            if f.skip {
                quote! { #member: ::core::default::Default::default() }
            } else {
                quote! { #member: ::flatwire::Decode::decode(&mut *source)? }
            }
        });
        // Braced init works for tuple structs too (`Self { 0: .., 1: .. }`).
        quote! {
            impl #dec_impl ::flatwire::FromSource for #name #ty_generics #dec_where {
                #[allow(unused_variables)]
                fn from_source(source: &mut dyn ::flatwire::Source) -> ::flatwire::Result<Self> {
                    ::core::result::Result::Ok(Self { #(#init,)* })
                }
            }
        }
    } else {
        quote! {}
    };

    let decodable_impl = if hooks.after_construct {
        let assign = field_infos.iter().filter(|f| !f.skip).map(|f| {
            let member = &f.member;
            quote! { self.#member = ::flatwire::Decode::decode(&mut *source)?; }
        });
        quote! {
            impl #dec_impl ::flatwire::Decodable for #name #ty_generics #dec_where {
                #[allow(unused_variables)]
                fn decode_from(&mut self, source: &mut dyn ::flatwire::Source) -> ::flatwire::Result<()> {
                    #(#assign)*
                    ::core::result::Result::Ok(())
                }
            }
        }
    } else {
        quote! {}
    };

    let decode_impl = if hooks.encode_only {
        quote! {}
    } else {
        // Must agree with `DecodePath::resolve`; `decode_during`/`decode_after`
        // fail the build otherwise.
        let decode_fn = if hooks.from_source {
            quote!(decode_during)
        } else {
            quote!(decode_after)
        };
        quote! {
            impl #dec_impl ::flatwire::Decode for #name #ty_generics #dec_where {
                fn decode<__S: ::flatwire::Source + ?Sized>(source: &mut __S) -> ::flatwire::Result<Self> {
                    ::flatwire::codec::capability::#decode_fn(source)
                }
            }
        }
    };
    let from_source = hooks.from_source;
    let after_construct = hooks.after_construct;

    Ok(quote! {
        impl #enc_impl ::flatwire::Encodable for #name #ty_generics #enc_where {
            #[allow(unused_variables)]
            fn encode_to(&self, sink: &mut dyn ::flatwire::Sink) -> ::flatwire::Result<()> {
                #(#encode_fields)*
                ::core::result::Result::Ok(())
            }
        }

        #from_source_impl

        #decodable_impl

        impl #plain_impl ::flatwire::Classify for #name #ty_generics #plain_where {
            const SHAPE: ::flatwire::Shape = ::flatwire::Shape::UserHook;
        }

        impl #plain_impl ::flatwire::UserHook for #name #ty_generics #plain_where {
            const DECODE_PATH: ::core::option::Option<::flatwire::DecodePath> =
                ::flatwire::DecodePath::resolve(#from_source, #after_construct);
        }

        impl #enc_impl ::flatwire::Encode for #name #ty_generics #enc_where {
            fn encode<__S: ::flatwire::Sink + ?Sized>(&self, sink: &mut __S) -> ::flatwire::Result<()> {
                ::flatwire::codec::capability::encode_dyn(self, sink)
            }
        }

        #decode_impl
    })
}

/// Read `#[codec(from_source / after_construct / encode_only)]` off the container.
fn parse_container_attrs(input: &DeriveInput) -> syn::Result<DecodeHooks> {
    let mut hooks = DecodeHooks {
        from_source: false,
        after_construct: false,
        encode_only: false,
    };
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("codec")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("from_source") {
                hooks.from_source = true;
                Ok(())
            } else if meta.path.is_ident("after_construct") {
                hooks.after_construct = true;
                Ok(())
            } else if meta.path.is_ident("encode_only") {
                hooks.encode_only = true;
                Ok(())
            } else {
                Err(meta.error("expected `from_source`, `after_construct` or `encode_only`"))
            }
        })?;
    }
    if hooks.encode_only {
        if hooks.from_source || hooks.after_construct {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`encode_only` cannot be combined with a decode hook",
            ));
        }
        return Ok(hooks);
    }
    if !hooks.from_source && !hooks.after_construct {
        hooks.from_source = true;
    }
    Ok(hooks)
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    let mut infos = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let mut skip = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("codec")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        infos.push(FieldInfo { member, skip });
    }
    Ok(infos)
}

/// Clone `generics` with `bound` added to every type parameter.
fn with_bound(generics: &Generics, bound: TokenStream2) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause.predicates.push(parse_quote!(#ident: #bound));
    }
    generics
}
