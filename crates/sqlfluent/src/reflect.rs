//! Per-type property accessor tables.
//!
//! Commands read property values by dotted path (`Address.City`) on the write
//! side and set them by column name on the read side. Instead of runtime
//! reflection every entity exposes an accessor table, normally generated by
//! `#[derive(Entity)]`.

use crate::error::OrmResult;
use crate::value::Value;

/// The value of one property as seen through [`Reflect`].
pub enum Property<'a> {
    /// A scalar column value.
    Value(Value),
    /// A nested object; `None` when the nested object is absent.
    Nested(Option<&'a dyn Reflect>),
}

/// Read access to an object's properties by name.
///
/// This trait is dyn-compatible so heterogeneous objects can be walked along
/// a dotted path.
pub trait Reflect {
    /// Unqualified type name, e.g. `"Person"`.
    fn type_name(&self) -> &'static str;

    /// Property names in declaration order.
    fn property_names(&self) -> &'static [&'static str];

    /// Look up a property by exact name.
    fn property(&self, name: &str) -> Option<Property<'_>>;
}

/// A type that commands can be built for and rows can be mapped into.
///
/// # Example
///
/// ```ignore
/// use sqlfluent::Entity;
///
/// #[derive(Debug, Default, Entity)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// // Person::fields().name is a typed selector for the `Name` property.
/// ```
pub trait Entity: Reflect + Default {
    /// Type name used for the default table name and qualified columns.
    const TYPE_NAME: &'static str;

    /// Property names in declaration order.
    const PROPERTIES: &'static [&'static str];

    /// Struct of typed field selectors, one per property.
    type Fields;

    fn fields() -> Self::Fields;

    /// Convert `value` and assign it to the named property.
    ///
    /// Returns `Ok(false)` when no settable property has that name.
    fn set_property(&mut self, name: &str, value: &Value) -> OrmResult<bool>;
}

/// Walk a dotted property path on `target` and return the value found.
///
/// Every miss is silent: an unknown segment, an absent nested object or a
/// path that ends on a nested object all yield [`Value::Null`].
pub fn resolve_path(target: &dyn Reflect, path: &str) -> Value {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    match (target.property(head), rest) {
        (Some(Property::Value(value)), None) => value,
        (Some(Property::Nested(Some(inner))), Some(rest)) => resolve_path(inner, rest),
        _ => Value::Null,
    }
}

/// Like [`resolve_path`], but tolerates a missing target.
pub fn resolve_optional(target: Option<&dyn Reflect>, path: &str) -> Value {
    target.map_or(Value::Null, |t| resolve_path(t, path))
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Hand-written entities used by unit tests inside this crate.

    use super::*;
    use crate::error::OrmError;
    use crate::expr::Field;
    use crate::value::FromValue;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Address {
        pub city: String,
        pub zip: Option<String>,
    }

    pub struct AddressFields {
        pub city: Field<Address, String>,
        pub zip: Field<Address, String>,
    }

    impl Reflect for Address {
        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn property_names(&self) -> &'static [&'static str] {
            Self::PROPERTIES
        }

        fn property(&self, name: &str) -> Option<Property<'_>> {
            use crate::value::ToValue;
            match name {
                "City" => Some(Property::Value(self.city.to_value())),
                "Zip" => Some(Property::Value(self.zip.to_value())),
                _ => None,
            }
        }
    }

    impl Entity for Address {
        const TYPE_NAME: &'static str = "Address";
        const PROPERTIES: &'static [&'static str] = &["City", "Zip"];
        type Fields = AddressFields;

        fn fields() -> AddressFields {
            AddressFields {
                city: Field::new("Address", "City"),
                zip: Field::new("Address", "Zip"),
            }
        }

        fn set_property(&mut self, name: &str, value: &Value) -> OrmResult<bool> {
            let decode = |e: crate::value::ValueError| OrmError::decode(name, e.to_string());
            match name {
                "City" => self.city = FromValue::from_value(value).map_err(decode)?,
                "Zip" => self.zip = FromValue::from_value(value).map_err(decode)?,
                _ => return Ok(false),
            }
            Ok(true)
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Person {
        pub id: i64,
        pub name: String,
        pub age: i32,
        pub active: bool,
        pub nickname: Option<String>,
        pub address: Option<Address>,
    }

    pub struct PersonFields {
        pub id: Field<Person, i64>,
        pub name: Field<Person, String>,
        pub age: Field<Person, i32>,
        pub active: Field<Person, bool>,
        pub nickname: Field<Person, String>,
        pub address: Field<Person, Address>,
    }

    impl Reflect for Person {
        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn property_names(&self) -> &'static [&'static str] {
            Self::PROPERTIES
        }

        fn property(&self, name: &str) -> Option<Property<'_>> {
            use crate::value::ToValue;
            match name {
                "Id" => Some(Property::Value(self.id.to_value())),
                "Name" => Some(Property::Value(self.name.to_value())),
                "Age" => Some(Property::Value(self.age.to_value())),
                "Active" => Some(Property::Value(self.active.to_value())),
                "Nickname" => Some(Property::Value(self.nickname.to_value())),
                "Address" => Some(Property::Nested(
                    self.address.as_ref().map(|a| a as &dyn Reflect),
                )),
                _ => None,
            }
        }
    }

    impl Entity for Person {
        const TYPE_NAME: &'static str = "Person";
        const PROPERTIES: &'static [&'static str] =
            &["Id", "Name", "Age", "Active", "Nickname", "Address"];
        type Fields = PersonFields;

        fn fields() -> PersonFields {
            PersonFields {
                id: Field::new("Person", "Id"),
                name: Field::new("Person", "Name"),
                age: Field::new("Person", "Age"),
                active: Field::new("Person", "Active"),
                nickname: Field::new("Person", "Nickname"),
                address: Field::new("Person", "Address"),
            }
        }

        fn set_property(&mut self, name: &str, value: &Value) -> OrmResult<bool> {
            let decode = |e: crate::value::ValueError| OrmError::decode(name, e.to_string());
            match name {
                "Id" => self.id = FromValue::from_value(value).map_err(decode)?,
                "Name" => self.name = FromValue::from_value(value).map_err(decode)?,
                "Age" => self.age = FromValue::from_value(value).map_err(decode)?,
                "Active" => self.active = FromValue::from_value(value).map_err(decode)?,
                "Nickname" => self.nickname = FromValue::from_value(value).map_err(decode)?,
                _ => return Ok(false),
            }
            Ok(true)
        }
    }

    impl crate::mapper::FromRow for Person {
        fn from_row(row: &crate::driver::Row) -> OrmResult<Self> {
            crate::mapper::map_entity(row)
        }
    }

    pub fn bob() -> Person {
        Person {
            id: 1,
            name: "Bob".to_string(),
            age: 50,
            active: true,
            nickname: None,
            address: Some(Address {
                city: "Leeds".to_string(),
                zip: None,
            }),
        }
    }
}
