//! Ordered parameter sets.

use crate::column::{ColumnBinding, PARAMETER_MARKER};
use crate::reflect::{Property, Reflect};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered `name → value` mapping sent to the driver.
///
/// Names keep their first insertion position; inserting an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, Value)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl crate::value::ToValue) -> Self {
        self.insert(name, value.to_value());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn as_slice(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }

    /// Parameters of every column that has a parameter name, in column order.
    pub fn from_columns(columns: &[ColumnBinding]) -> Self {
        let mut params = Self::new();
        for column in columns {
            if let Some(name) = column.parameter_name.as_deref().filter(|n| !n.is_empty()) {
                params.insert(name, column.value.clone());
            }
        }
        params
    }

    /// `@Property → value` for every scalar property of `object`.
    ///
    /// Nested objects are not flattened.
    pub fn from_reflect(object: &dyn Reflect) -> Self {
        let mut params = Self::new();
        for name in object.property_names() {
            if let Some(Property::Value(value)) = object.property(name) {
                params.insert(format!("{PARAMETER_MARKER}{name}"), value);
            }
        }
        params
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
