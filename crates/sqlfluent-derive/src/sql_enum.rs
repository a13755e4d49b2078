//! `#[derive(SqlEnum)]`: store a fieldless enum by its symbolic name.

use crate::attrs::SqlAttrs;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Lit, Result, UnOp};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(e) => &e.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "SqlEnum can only be derived for enums",
            ));
        }
    };

    let mut to_value_arms = Vec::new();
    let mut from_text_arms = Vec::new();
    let mut from_int_arms = Vec::new();
    let mut discriminant: i64 = 0;

    for variant in variants {
        if !matches!(&variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "SqlEnum variants must be unit variants (no fields)",
            ));
        }

        let variant_ident = &variant.ident;
        let attrs = SqlAttrs::parse(&variant.attrs)?;
        let sql_name = attrs
            .rename
            .unwrap_or_else(|| variant_ident.to_string());

        if let Some((_, expr)) = &variant.discriminant {
            discriminant = parse_discriminant(expr)?;
        }

        to_value_arms.push(quote! {
            #name::#variant_ident => #sql_name,
        });
        from_text_arms.push(quote! {
            #sql_name => ::std::result::Result::Ok(#name::#variant_ident),
        });
        from_int_arms.push(quote! {
            #discriminant => ::std::result::Result::Ok(#name::#variant_ident),
        });

        discriminant += 1;
    }

    let type_name = name.to_string();

    Ok(quote! {
        impl ::sqlfluent::ToValue for #name {
            fn to_value(&self) -> ::sqlfluent::Value {
                let s: &str = match self {
                    #(#to_value_arms)*
                };
                ::sqlfluent::Value::Text(::std::string::ToString::to_string(s))
            }
        }

        impl ::sqlfluent::FromValue for #name {
            fn from_value(
                value: &::sqlfluent::Value,
            ) -> ::std::result::Result<Self, ::sqlfluent::ValueError> {
                match value {
                    ::sqlfluent::Value::Text(s) => match s.as_str() {
                        #(#from_text_arms)*
                        _ => ::std::result::Result::Err(::sqlfluent::ValueError::new(#type_name, value)),
                    },
                    ::sqlfluent::Value::Int(i) => match *i {
                        #(#from_int_arms)*
                        _ => ::std::result::Result::Err(::sqlfluent::ValueError::new(#type_name, value)),
                    },
                    _ => ::std::result::Result::Err(::sqlfluent::ValueError::new(#type_name, value)),
                }
            }
        }
    })
}

/// Read an integer literal discriminant, optionally negated.
fn parse_discriminant(expr: &Expr) -> Result<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => parse_discriminant(expr).map(|v| -v),
        _ => Err(syn::Error::new_spanned(
            expr,
            "SqlEnum discriminants must be integer literals",
        )),
    }
}
