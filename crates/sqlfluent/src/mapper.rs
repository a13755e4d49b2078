//! Running SQL against a driver and mapping results.
//!
//! Every failure raised while a statement runs (driver error or conversion
//! error) is returned as [`OrmError::DataOperation`] carrying the SQL text and
//! the bound parameters.

use crate::config::SqlConfig;
use crate::driver::{Driver, DriverCommand, Row};
use crate::error::{OrmError, OrmResult};
use crate::params::Parameters;
use crate::reflect::Entity;
use crate::trace::Operation;
use crate::value::{FromValue, Value};
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Trait for converting a result row into a Rust value.
///
/// Scalars read the first column. Entities are normally covered by
/// `#[derive(Entity)]`, which maps columns onto properties by name.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> OrmResult<Self>;
}

macro_rules! scalar_from_row {
    ($($t:ty),*) => {
        $(
            impl FromRow for $t {
                fn from_row(row: &Row) -> OrmResult<Self> {
                    first_column(row)
                }
            }

            impl FromRow for Option<$t> {
                fn from_row(row: &Row) -> OrmResult<Self> {
                    first_column(row)
                }
            }
        )*
    };
}

scalar_from_row!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, String, NaiveDateTime, Uuid,
    serde_json::Value, Vec<u8>
);

impl FromRow for Value {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(row.get_index(0).cloned().unwrap_or(Value::Null))
    }
}

impl FromRow for Row {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(row.clone())
    }
}

fn first_column<T: FromValue>(row: &Row) -> OrmResult<T> {
    let column = row.columns().first().map(String::as_str).unwrap_or("0");
    let value = row
        .get_index(0)
        .ok_or_else(|| OrmError::decode(column, "row has no columns"))?;
    T::from_value(value).map_err(|e| OrmError::decode(column, e.to_string()))
}

/// Map a row onto a fresh `T::default()`.
///
/// Each property with a column of the same name (case-insensitive) and a
/// non-null value is converted and set. Properties without a column keep
/// their default, and columns without a property are ignored.
pub fn map_entity<T: Entity>(row: &Row) -> OrmResult<T> {
    let mut result = T::default();
    for name in T::PROPERTIES {
        match row.get(name) {
            Some(value) if !value.is_null() => {
                result.set_property(name, value)?;
            }
            _ => {}
        }
    }
    Ok(result)
}

/// Run a query and map every row to `U`.
pub fn query<U: FromRow>(
    driver: &dyn Driver,
    config: &SqlConfig,
    sql: &str,
    params: &Parameters,
) -> OrmResult<Vec<U>> {
    run(config, Operation::Query, sql, params, |command| {
        let rows = driver.execute_reader(&command.sequential())?;
        rows.iter().map(U::from_row).collect()
    })
}

/// Run a statement and return the number of affected rows.
pub fn execute_non_query(
    driver: &dyn Driver,
    config: &SqlConfig,
    sql: &str,
    params: &Parameters,
) -> OrmResult<u64> {
    run(config, Operation::NonQuery, sql, params, |command| {
        Ok(driver.execute_non_query(&command)?)
    })
}

/// Run a statement and convert its scalar result.
///
/// A NULL or absent result yields `U::default()`.
pub fn execute_scalar<U: FromValue + Default>(
    driver: &dyn Driver,
    config: &SqlConfig,
    sql: &str,
    params: &Parameters,
) -> OrmResult<U> {
    run(config, Operation::Scalar, sql, params, |command| {
        match driver.execute_scalar(&command)? {
            Value::Null => Ok(U::default()),
            value => U::from_value(&value).map_err(|e| OrmError::decode("0", e.to_string())),
        }
    })
}

fn run<R>(
    config: &SqlConfig,
    operation: Operation,
    sql: &str,
    params: &Parameters,
    call: impl FnOnce(DriverCommand<'_>) -> OrmResult<R>,
) -> OrmResult<R> {
    config.tracer.before(operation, sql, params);

    let command = DriverCommand::new(sql, params.as_slice(), config.command_timeout);
    call(command).map_err(|err| {
        config.tracer.failed(operation, sql, &err);
        err.with_context(sql, params.as_slice().to_vec())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::fixtures::Person;

    #[test]
    fn map_entity_sets_matching_columns_case_insensitively() {
        let row = Row::from_pairs([
            ("name", Value::Text("Bob".into())),
            ("AGE", Value::Int(50)),
            ("Active", Value::Int(1)),
        ]);
        let person: Person = map_entity(&row).unwrap();
        assert_eq!(person.name, "Bob");
        assert_eq!(person.age, 50);
        assert!(person.active);
    }

    #[test]
    fn map_entity_leaves_missing_and_null_columns_at_default() {
        let row = Row::from_pairs([("Name", Value::Text("Bob".into())), ("Age", Value::Null)]);
        let person: Person = map_entity(&row).unwrap();
        assert_eq!(person.age, 0);
        assert_eq!(person.id, 0);
        assert_eq!(person.nickname, None);
    }

    #[test]
    fn map_entity_ignores_extra_columns() {
        let row = Row::from_pairs([("Name", Value::Text("Bob".into())), ("Shoe", Value::Int(9))]);
        let person: Person = map_entity(&row).unwrap();
        assert_eq!(person.name, "Bob");
    }

    #[test]
    fn map_entity_reports_conversion_failures() {
        let row = Row::from_pairs([("Age", Value::Text("old".into()))]);
        let err = map_entity::<Person>(&row).unwrap_err();
        assert!(matches!(err, OrmError::Decode { ref column, .. } if column == "Age"));
    }

    #[test]
    fn scalars_read_first_column() {
        let row = Row::from_pairs([("COUNT(1)", Value::Int(3)), ("x", Value::Int(9))]);
        assert_eq!(i64::from_row(&row).unwrap(), 3);
        assert_eq!(String::from_row(&row).unwrap(), "3");
        assert_eq!(Option::<i32>::from_row(&row).unwrap(), Some(3));

        let empty = Row::default();
        assert!(i32::from_row(&empty).is_err());
    }
}
