use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Ident, Index, LitStr, Member,
    parse_macro_input, spanned::Spanned,
};

/// Derives `typedcoll::Element`, exposing fields as named properties.
///
/// Every exposed field type must implement `Element` itself.
///
/// Field attributes:
/// - `#[element(skip)]` hides the field.
/// - `#[element(rename = "name")]` exposes the field under another name.
///
/// Struct attributes:
/// - `#[element(getter = "method")]` exposes `self.method()` under the method's name.
///   The method must take `&self` and return an owned `Element`.
///
/// Tuple struct fields are exposed as `"0"`, `"1"`, ...
#[proc_macro_derive(Element, attributes(element))]
pub fn derive_element(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct Property {
    name: LitStr,
    access: TokenStream2,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(DataStruct { fields, .. }) => fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Element can only be derived for structs",
            ));
        }
    };

    let mut properties = Vec::new();
    let mut field_types = Vec::new();

    for (position, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(position)),
        };
        let name = attrs.rename.unwrap_or_else(|| match &field.ident {
            Some(ident) => LitStr::new(&ident.to_string(), ident.span()),
            None => LitStr::new(&position.to_string(), field.span()),
        });

        properties.push(Property {
            name,
            access: quote! { ::core::clone::Clone::clone(&self.#member) },
        });
        field_types.push(&field.ty);
    }

    for getter in struct_getters(&input.attrs)? {
        let method: Ident = getter.parse()?;
        properties.push(Property {
            name: getter,
            access: quote! { self.#method() },
        });
    }

    let mut seen = HashSet::new();
    for property in &properties {
        if !seen.insert(property.name.value()) {
            return Err(syn::Error::new(
                property.name.span(),
                format!("duplicate element property `{}`", property.name.value()),
            ));
        }
    }

    let names = properties.iter().map(|p| &p.name);
    let accesses = properties.iter().map(|p| &p.access);

    // Generic field types must be elements themselves
    let where_clause = if input.generics.params.is_empty() {
        quote! { #where_clause }
    } else {
        let predicates = where_clause.into_iter().flat_map(|w| w.predicates.iter());
        quote! {
            where
                #( #predicates, )*
                #( #field_types: ::typedcoll::Element, )*
        }
    };

    Ok(quote! {
        impl #impl_generics ::typedcoll::Element for #struct_name #ty_generics #where_clause {
            fn property(&self, name: &str) -> ::core::option::Option<::typedcoll::Value> {
                match name {
                    #( #names => ::core::option::Option::Some(::typedcoll::Value::new(#accesses)), )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<LitStr>,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("element")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    parsed.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `rename = \"...\"`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

fn struct_getters(attrs: &[Attribute]) -> syn::Result<Vec<LitStr>> {
    let mut getters = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("element")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("getter") {
                getters.push(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `getter = \"...\"`"))
            }
        })?;
    }

    Ok(getters)
}
