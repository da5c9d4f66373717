//! `#[derive(ExtType)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, DeriveInput, parse_macro_input};

/// Options read from `#[ext_type(...)]`.
#[derive(Default)]
struct ExtTypeArgs {
    named: bool,
}

impl ExtTypeArgs {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("ext_type") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("named") {
                    args.named = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown ext_type option, expected `named`"))
                }
            })?;
        }
        Ok(args)
    }
}

pub fn derive_ext_type_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let args = ExtTypeArgs::from_attrs(&input.attrs)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let serialize = if args.named {
        quote! { ::mpext::__private::rmp_serde::to_vec_named(self) }
    } else {
        quote! { ::mpext::__private::rmp_serde::to_vec(self) }
    };

    Ok(quote! {
        impl #impl_generics ::mpext::ExtType for #name #ty_generics #where_clause {
            fn to_msgpack_ext(&self) -> ::std::result::Result<::std::vec::Vec<u8>, ::mpext::BoxError> {
                #serialize.map_err(::std::convert::Into::into)
            }

            fn from_msgpack_ext(data: &[u8]) -> ::std::result::Result<Self, ::mpext::BoxError> {
                ::mpext::__private::rmp_serde::from_slice(data).map_err(::std::convert::Into::into)
            }
        }
    })
}
