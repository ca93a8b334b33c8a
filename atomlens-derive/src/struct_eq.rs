//! Implementation of the `#[derive(StructEq)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DeriveInput, Fields, Generics, Ident, parse_macro_input, parse_quote};

/// Main implementation of the `StructEq` derive macro.
pub fn derive_struct_eq_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = add_struct_eq_bounds(input.generics.clone());

    let body = match &input.data {
        Data::Struct(data_struct) => compare_struct_fields(&data_struct.fields),
        Data::Enum(data_enum) => compare_enum_variants(data_enum),
        Data::Union(_) => {
            return TokenStream::from(
                syn::Error::new_spanned(&input.ident, "StructEq cannot be derived for unions.")
                    .to_compile_error(),
            );
        }
    };

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    TokenStream::from(quote! {
        impl #impl_generics ::atomlens::equality::StructEq for #name #type_generics #where_clause {
            fn struct_eq(&self, other: &Self) -> bool {
                #body
            }
        }
    })
}

fn add_struct_eq_bounds(mut generics: Generics) -> Generics {
    for parameter in generics.type_params_mut() {
        parameter
            .bounds
            .push(parse_quote!(::atomlens::equality::StructEq));
    }
    generics
}

fn compare_struct_fields(fields: &Fields) -> TokenStream2 {
    let comparisons: Vec<TokenStream2> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .map(|field_name| {
                quote! { ::atomlens::equality::equals(&self.#field_name, &other.#field_name) }
            })
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(syn::Index::from)
            .map(|index| quote! { ::atomlens::equality::equals(&self.#index, &other.#index) })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    if comparisons.is_empty() {
        return quote! {
            let _ = other;
            true
        };
    }
    conjunction(&comparisons)
}

fn compare_enum_variants(data_enum: &DataEnum) -> TokenStream2 {
    let arms: Vec<TokenStream2> = data_enum
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;
            match &variant.fields {
                Fields::Unit => quote! { (Self::#variant_name, Self::#variant_name) => true, },
                Fields::Unnamed(unnamed) => {
                    let left: Vec<Ident> = (0..unnamed.unnamed.len())
                        .map(|index| format_ident!("left_{}", index))
                        .collect();
                    let right: Vec<Ident> = (0..unnamed.unnamed.len())
                        .map(|index| format_ident!("right_{}", index))
                        .collect();
                    let body = pairwise(&left, &right);
                    quote! {
                        (Self::#variant_name(#(#left),*), Self::#variant_name(#(#right),*)) => #body,
                    }
                }
                Fields::Named(named) => {
                    let field_names: Vec<&Ident> = named
                        .named
                        .iter()
                        .filter_map(|field| field.ident.as_ref())
                        .collect();
                    let left: Vec<Ident> = field_names
                        .iter()
                        .map(|field_name| format_ident!("left_{}", field_name))
                        .collect();
                    let right: Vec<Ident> = field_names
                        .iter()
                        .map(|field_name| format_ident!("right_{}", field_name))
                        .collect();
                    let body = pairwise(&left, &right);
                    quote! {
                        (
                            Self::#variant_name { #(#field_names: #left),* },
                            Self::#variant_name { #(#field_names: #right),* },
                        ) => #body,
                    }
                }
            }
        })
        .collect();

    quote! {
        match (self, other) {
            #(#arms)*
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

fn pairwise(left: &[Ident], right: &[Ident]) -> TokenStream2 {
    let comparisons: Vec<TokenStream2> = left
        .iter()
        .zip(right)
        .map(|(left, right)| quote! { ::atomlens::equality::equals(#left, #right) })
        .collect();
    conjunction(&comparisons)
}

fn conjunction(comparisons: &[TokenStream2]) -> TokenStream2 {
    if comparisons.is_empty() {
        quote! { true }
    } else {
        quote! { #(#comparisons)&&* }
    }
}
