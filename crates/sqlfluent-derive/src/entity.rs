//! Entity derive macro implementation

use crate::attrs::SqlAttrs;
use crate::common::syn_types::{option_inner, selector_type};
use heck::ToUpperCamelCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

struct PropertyInfo {
    ident: syn::Ident,
    name: String,
    ty: syn::Type,
    nested: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let struct_attrs = SqlAttrs::parse(&input.attrs)?;
    if struct_attrs.nested || struct_attrs.skip {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "only #[sql(rename = \"...\")] applies to the struct itself",
        ));
    }
    let type_name = struct_attrs.rename.unwrap_or_else(|| name.to_string());

    let mut props: Vec<PropertyInfo> = Vec::new();
    for field in fields {
        let attrs = SqlAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let prop_name = attrs
            .rename
            .unwrap_or_else(|| ident.unraw().to_string().to_upper_camel_case());
        if props.iter().any(|p| p.name == prop_name) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate property name `{prop_name}`"),
            ));
        }
        props.push(PropertyInfo {
            ident,
            name: prop_name,
            ty: field.ty.clone(),
            nested: attrs.nested,
        });
    }

    let fields_ident = format_ident!("{}Fields", name);
    let fields_doc = format!("Typed field selectors of [`{name}`].");
    let prop_names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();

    let field_decls = props.iter().map(|p| {
        let ident = &p.ident;
        let ty = selector_type(&p.ty);
        quote! { pub #ident: ::sqlfluent::Field<#name, #ty> }
    });

    let field_inits = props.iter().map(|p| {
        let ident = &p.ident;
        let prop = &p.name;
        quote! { #ident: ::sqlfluent::Field::new(#type_name, #prop) }
    });

    let property_arms = props.iter().map(|p| {
        let ident = &p.ident;
        let prop = &p.name;
        let property = if !p.nested {
            quote! { ::sqlfluent::Property::Value(::sqlfluent::ToValue::to_value(&self.#ident)) }
        } else if option_inner(&p.ty).is_some() {
            quote! {
                ::sqlfluent::Property::Nested(
                    self.#ident.as_ref().map(|v| v as &dyn ::sqlfluent::Reflect)
                )
            }
        } else {
            quote! {
                ::sqlfluent::Property::Nested(
                    ::std::option::Option::Some(&self.#ident as &dyn ::sqlfluent::Reflect)
                )
            }
        };
        quote! { #prop => ::std::option::Option::Some(#property), }
    });

    // Nested objects are never set from a row column.
    let set_arms = props.iter().filter(|p| !p.nested).map(|p| {
        let ident = &p.ident;
        let prop = &p.name;
        quote! {
            #prop => {
                self.#ident = ::sqlfluent::FromValue::from_value(value).map_err(|e| {
                    ::sqlfluent::OrmError::decode(name, ::std::string::ToString::to_string(&e))
                })?;
            }
        }
    });

    Ok(quote! {
        #[doc = #fields_doc]
        #[allow(dead_code)]
        #vis struct #fields_ident {
            #(#field_decls,)*
        }

        impl ::sqlfluent::Reflect for #name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn property_names(&self) -> &'static [&'static str] {
                <Self as ::sqlfluent::reflect::Entity>::PROPERTIES
            }

            fn property(&self, name: &str) -> ::std::option::Option<::sqlfluent::Property<'_>> {
                match name {
                    #(#property_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::sqlfluent::reflect::Entity for #name {
            const TYPE_NAME: &'static str = #type_name;
            const PROPERTIES: &'static [&'static str] = &[#(#prop_names),*];
            type Fields = #fields_ident;

            fn fields() -> #fields_ident {
                #fields_ident {
                    #(#field_inits,)*
                }
            }

            fn set_property(
                &mut self,
                name: &str,
                value: &::sqlfluent::Value,
            ) -> ::sqlfluent::OrmResult<bool> {
                match name {
                    #(#set_arms)*
                    _ => return ::std::result::Result::Ok(false),
                }
                ::std::result::Result::Ok(true)
            }
        }

        impl ::sqlfluent::FromRow for #name {
            fn from_row(row: &::sqlfluent::Row) -> ::sqlfluent::OrmResult<Self> {
                ::sqlfluent::map_entity(row)
            }
        }
    })
}
