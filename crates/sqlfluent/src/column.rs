//! Column bindings: a property on the target object paired with its SQL
//! column, parameter name and current value.

use crate::error::OrmResult;
use crate::expr::{self, IntoLambda};
use crate::reflect::{Reflect, resolve_optional};
use crate::value::Value;

/// Parameter marker prefix.
pub const PARAMETER_MARKER: char = '@';

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    /// Rendered column, e.g. `[AddressCity]`, `*` or `COUNT(1)`.
    pub column_name: String,
    /// `@AddressCity`; `None` for pseudo-columns.
    pub parameter_name: Option<String>,
    /// Dotted property path, e.g. `Address.City`.
    pub property_path: String,
    /// Resolved property value, [`Value::Null`] when absent.
    pub value: Value,
}

impl ColumnBinding {
    /// Build a binding from a selector, resolving its value on `target`.
    pub fn build<T>(target: Option<&dyn Reflect>, selector: impl IntoLambda<T>) -> OrmResult<Self> {
        let path = expr::member_path(&selector.into_lambda())?.path();
        let sql_name = strip_dots(&path);

        Ok(Self {
            column_name: format!("[{sql_name}]"),
            parameter_name: Some(format!("{PARAMETER_MARKER}{sql_name}")),
            value: resolve_optional(target, &path),
            property_path: path,
        })
    }

    /// A plain column given by name. The name is used verbatim.
    pub fn named(target: Option<&dyn Reflect>, name: &str) -> Self {
        Self {
            column_name: name.to_string(),
            parameter_name: Some(format!("{PARAMETER_MARKER}{name}")),
            property_path: name.to_string(),
            value: resolve_optional(target, name),
        }
    }

    /// A parameterless pseudo-column such as `*` or `COUNT(1)`.
    pub fn pseudo(expression: &str) -> Self {
        Self {
            column_name: expression.to_string(),
            parameter_name: None,
            property_path: String::new(),
            value: Value::Null,
        }
    }

    /// Override the rendered column and parameter names. The name is used verbatim.
    pub fn renamed(mut self, name: &str) -> Self {
        self.column_name = name.to_string();
        self.parameter_name = Some(format!("{PARAMETER_MARKER}{name}"));
        self
    }

    /// Wrap the column in `MAX(...)`, keeping the parameter name.
    pub fn max(mut self) -> Self {
        self.column_name = format!("MAX({})", self.column_name);
        self
    }

    /// `column = @param`, as used by UPDATE.
    pub fn assignment(&self) -> String {
        format!(
            "{} = {}",
            self.column_name,
            self.parameter_name.as_deref().unwrap_or_default()
        )
    }
}

fn strip_dots(path: &str) -> String {
    path.replace('.', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Entity;
    use crate::reflect::fixtures::{Person, bob};

    #[test]
    fn build_quotes_column_and_prefixes_parameter() {
        let person = bob();
        let col = ColumnBinding::build(Some(&person), Person::fields().name).unwrap();
        assert_eq!(col.column_name, "[Name]");
        assert_eq!(col.parameter_name.as_deref(), Some("@Name"));
        assert_eq!(col.property_path, "Name");
        assert_eq!(col.value, Value::Text("Bob".into()));
    }

    #[test]
    fn nested_path_strips_dots() {
        let person = bob();
        let col = ColumnBinding::build(
            Some(&person),
            Person::fields().address.then(|a| a.city),
        )
        .unwrap();
        assert_eq!(col.column_name, "[AddressCity]");
        assert_eq!(col.parameter_name.as_deref(), Some("@AddressCity"));
        assert_eq!(col.property_path, "Address.City");
        assert_eq!(col.value, Value::Text("Leeds".into()));
    }

    #[test]
    fn absent_value_and_missing_target_resolve_to_null() {
        let person = bob();
        let col = ColumnBinding::build(Some(&person), Person::fields().nickname).unwrap();
        assert_eq!(col.value, Value::Null);

        let col = ColumnBinding::build(None, Person::fields().age).unwrap();
        assert_eq!(col.value, Value::Null);
        assert_eq!(col.column_name, "[Age]");
    }

    #[test]
    fn selector_must_be_a_member() {
        let err = ColumnBinding::build(None, Person::fields().age.gt(3)).unwrap_err();
        assert!(err.is_expression_shape());
    }

    #[test]
    fn renamed_and_max_columns() {
        let person = bob();
        let col = ColumnBinding::build(Some(&person), Person::fields().age)
            .unwrap()
            .renamed("[Years]");
        assert_eq!(col.column_name, "[Years]");
        assert_eq!(col.parameter_name.as_deref(), Some("@[Years]"));
        assert_eq!(col.value, Value::Int(50));

        let max = ColumnBinding::build(None, Person::fields().age).unwrap().max();
        assert_eq!(max.column_name, "MAX([Age])");
        assert_eq!(max.parameter_name.as_deref(), Some("@Age"));
    }

    #[test]
    fn named_and_pseudo_columns() {
        let person = bob();
        let named = ColumnBinding::named(Some(&person), "Name");
        assert_eq!(named.column_name, "Name");
        assert_eq!(named.parameter_name.as_deref(), Some("@Name"));
        assert_eq!(named.value, Value::Text("Bob".into()));

        let star = ColumnBinding::pseudo("*");
        assert_eq!(star.parameter_name, None);
        assert_eq!(star.value, Value::Null);
        assert_eq!(named.assignment(), "Name = @Name");
    }
}
