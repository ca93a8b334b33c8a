//! Implementation of the `#[derive(Prisms)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, Variant, parse_macro_input};

/// Main implementation of the Prisms derive macro.
pub fn derive_prisms_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;

    let expanded = match &input.data {
        Data::Enum(data_enum) => {
            generate_enum_prisms(name, generics, &data_enum.variants.iter().collect::<Vec<_>>())
        }
        Data::Struct(_) => syn::Error::new_spanned(
            &input.ident,
            "Prisms can only be derived for enums, not structs. Use #[derive(Lenses)] for structs.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Prisms cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates prism methods for an enum's variants.
fn generate_enum_prisms(name: &Ident, generics: &Generics, variants: &[&Variant]) -> TokenStream2 {
    let prism_methods: Vec<TokenStream2> = variants
        .iter()
        .map(|variant| generate_variant_prism(variant))
        .collect();

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#prism_methods)*
        }
    }
}

/// Generates a prism method for a single enum variant.
fn generate_variant_prism(variant: &Variant) -> TokenStream2 {
    let variant_name = &variant.ident;
    let method_name = format_ident!("{}_prism", to_snake_case(&variant_name.to_string()));
    let doc = format!("Returns a prism focusing on the `{variant_name}` variant.");

    match &variant.fields {
        Fields::Unit => generate_unit_variant_prism(variant_name, &method_name, &doc),

        Fields::Unnamed(fields) => {
            let field_types: Vec<&Type> = fields.unnamed.iter().map(|field| &field.ty).collect();

            if let [field_type] = field_types.as_slice() {
                generate_single_field_tuple_prism(variant_name, &method_name, &doc, field_type)
            } else {
                let bindings: Vec<Ident> = (0..field_types.len())
                    .map(|index| format_ident!("v{}", index))
                    .collect();
                let pattern = quote! { Self::#variant_name(#(#bindings),*) };
                generate_multi_field_prism(&method_name, &doc, &field_types, &bindings, &pattern)
            }
        }

        Fields::Named(fields) => {
            let field_names: Vec<&Ident> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .collect();
            let field_types: Vec<&Type> = fields.named.iter().map(|field| &field.ty).collect();
            let bindings: Vec<Ident> = field_names
                .iter()
                .map(|field_name| format_ident!("field_{}", field_name))
                .collect();
            let pattern = quote! { Self::#variant_name { #(#field_names: #bindings),* } };
            generate_multi_field_prism(&method_name, &doc, &field_types, &bindings, &pattern)
        }
    }
}

/// Generates a prism for a unit variant. Its target is `()`.
fn generate_unit_variant_prism(variant_name: &Ident, method_name: &Ident, doc: &str) -> TokenStream2 {
    quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method_name() -> ::atomlens::optics::Prism<Self, ()>
        where
            Self: 'static,
        {
            ::atomlens::optics::Prism::new(
                |source: &Self| match source {
                    Self::#variant_name => Some(()),
                    #[allow(unreachable_patterns)]
                    _ => None,
                },
                |source: Self, (): ()| source,
            )
        }
    }
}

/// Generates a prism for a tuple variant with a single field.
fn generate_single_field_tuple_prism(
    variant_name: &Ident,
    method_name: &Ident,
    doc: &str,
    field_type: &Type,
) -> TokenStream2 {
    quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method_name() -> ::atomlens::optics::Prism<Self, #field_type>
        where
            Self: 'static,
            for<'__prism> #field_type: ::std::clone::Clone + ::atomlens::equality::StructEq,
        {
            ::atomlens::optics::Prism::new(
                |source: &Self| match source {
                    Self::#variant_name(value) => Some(::std::clone::Clone::clone(value)),
                    #[allow(unreachable_patterns)]
                    _ => None,
                },
                |source: Self, value: #field_type| match source {
                    Self::#variant_name(current) => {
                        if ::atomlens::equality::equals(&current, &value) {
                            Self::#variant_name(current)
                        } else {
                            Self::#variant_name(value)
                        }
                    }
                    #[allow(unreachable_patterns)]
                    other => other,
                },
            )
        }
    }
}

/// Generates a prism for a multi-field tuple variant or a struct variant.
/// The target is a tuple of the fields in definition order.
fn generate_multi_field_prism(
    method_name: &Ident,
    doc: &str,
    field_types: &[&Type],
    bindings: &[Ident],
    pattern: &TokenStream2,
) -> TokenStream2 {
    let tuple_type = quote! { (#(#field_types,)*) };
    let tuple_value = quote! { (#(#bindings,)*) };

    quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method_name() -> ::atomlens::optics::Prism<Self, #tuple_type>
        where
            Self: 'static,
            #(for<'__prism> #field_types: ::std::clone::Clone,)*
        {
            ::atomlens::optics::Prism::new(
                |source: &Self| match source {
                    #pattern => Some((#(::std::clone::Clone::clone(#bindings),)*)),
                    #[allow(unreachable_patterns)]
                    _ => None,
                },
                |source: Self, value: #tuple_type| match source {
                    #[allow(unused_variables)]
                    #pattern => {
                        let #tuple_value = value;
                        #pattern
                    }
                    #[allow(unreachable_patterns)]
                    other => other,
                },
            )
        }
    }
}

/// Converts a `CamelCase` or `PascalCase` string to `snake_case`.
fn to_snake_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let characters: Vec<char> = input.chars().collect();

    for (index, &character) in characters.iter().enumerate() {
        if character.is_uppercase() {
            if index > 0 {
                let previous = characters[index - 1];
                let next_is_lowercase = characters
                    .get(index + 1)
                    .is_some_and(|next| next.is_lowercase());

                // "keyPress" -> "key_press", "XMLParser" -> "xml_parser"
                if previous.is_lowercase() || (previous.is_uppercase() && next_is_lowercase) {
                    result.push('_');
                }
            }
            result.extend(character.to_lowercase());
        } else {
            result.push(character);
        }
    }

    result
}
