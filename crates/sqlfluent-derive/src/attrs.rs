//! Parsing of `#[sql(...)]` attributes.
//!
//! Accepted keys: `rename = "..."`, `nested`, `skip`. Unknown keys are a
//! compile error.

use syn::{Attribute, Expr, ExprLit, Lit, Meta, Result};

#[derive(Debug, Default)]
pub(crate) struct SqlAttrs {
    pub rename: Option<String>,
    pub nested: bool,
    pub skip: bool,
}

impl SqlAttrs {
    /// Collect every `#[sql(...)]` attribute in `attrs`.
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = SqlAttrs::default();
        for attr in attrs {
            if !attr.path().is_ident("sql") {
                continue;
            }
            let nested = attr.parse_args_with(
                syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
            )?;
            for meta in &nested {
                match meta {
                    Meta::Path(path) if path.is_ident("nested") => out.nested = true,
                    Meta::Path(path) if path.is_ident("skip") => out.skip = true,
                    Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                        let Expr::Lit(ExprLit {
                            lit: Lit::Str(s), ..
                        }) = &nv.value
                        else {
                            return Err(syn::Error::new_spanned(
                                &nv.value,
                                "expected a string literal: #[sql(rename = \"...\")]",
                            ));
                        };
                        out.rename = Some(s.value());
                    }
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "unknown sql attribute, expected `rename`, `nested` or `skip`",
                        ));
                    }
                }
            }
        }
        Ok(out)
    }
}
