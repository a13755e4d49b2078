//! Derive macros for sqlfluent
//!
//! Provides `#[derive(Entity)]` and `#[derive(SqlEnum)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod entity;
mod sql_enum;

/// Derive the accessor table, typed field selectors and row mapping for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlfluent::Entity;
///
/// #[derive(Debug, Default, Entity)]
/// struct Person {
///     id: i64,
///     name: String,
///     #[sql(rename = "Years")]
///     age: i32,
///     #[sql(nested)]
///     address: Option<Address>,
///     #[sql(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Generated
///
/// - `PersonFields` - one `Field<Person, V>` per property
/// - `impl Reflect` - property lookup by name, nested objects walkable
/// - `impl Entity` - `TYPE_NAME`, `PROPERTIES`, `fields()`, `set_property`
/// - `impl FromRow` - maps columns onto properties by name
///
/// Property names are the field names in UpperCamelCase (`first_name` is
/// `FirstName`).
///
/// # Attributes
///
/// - `#[sql(rename = "Name")]` - use a different property name (field or struct)
/// - `#[sql(nested)]` - the field holds another entity, addressed by dotted paths
/// - `#[sql(skip)]` - leave the field out of the accessor table
#[proc_macro_derive(Entity, attributes(sql))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `ToValue`/`FromValue` for a fieldless enum.
///
/// Values are written as the variant name. Reading accepts the variant name
/// or its integer discriminant.
///
/// # Example
///
/// ```ignore
/// use sqlfluent::SqlEnum;
///
/// #[derive(Debug, Default, SqlEnum)]
/// enum Status {
///     #[default]
///     Active,
///     #[sql(rename = "on_hold")]
///     OnHold,
///     Closed = 10,
/// }
/// ```
#[proc_macro_derive(SqlEnum, attributes(sql))]
pub fn derive_sql_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    sql_enum::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
