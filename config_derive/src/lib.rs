//! `#[derive(Merge)]` for layered configuration sections.
//!
//! `Option` fields take the value from `other` when present and keep the
//! one from `self` otherwise. Every other field is assumed to be a nested
//! section and is merged recursively through its own `merge`.
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(p) if p.qself.is_none() => p
            .path
            .segments
            .last()
            .map_or(false, |s| s.ident == "Option"),
        _ => false,
    }
}

#[proc_macro_derive(Merge)]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(named) => named.named,
            _ => {
                return syn::Error::new_spanned(
                    &name,
                    "#[derive(Merge)] needs a struct with named fields",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&name, "#[derive(Merge)] may only be used with structs")
                .to_compile_error()
                .into()
        }
    };

    let merges = fields.iter().map(|f| {
        let ident = &f.ident;

        if is_option(&f.ty) {
            quote! { #ident: other.#ident.or(self.#ident) }
        } else {
            quote! { #ident: self.#ident.merge(other.#ident) }
        }
    });

    let expansion = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn merge(self, other: Self) -> Self {
                Self {
                    #(#merges,)*
                }
            }
        }
    };

    TokenStream::from(expansion)
}
