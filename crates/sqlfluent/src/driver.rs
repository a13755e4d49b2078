//! Driver trait for unified database access.
//!
//! The library never opens connections itself. Anything that can run a SQL
//! text with named parameters implements [`Driver`]; a connection and a
//! transaction are simply two different implementations.

use crate::value::Value;
use std::time::Duration;

/// Error type reported by driver implementations.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a driver needs to run one command.
#[derive(Debug, Clone, Copy)]
pub struct DriverCommand<'a> {
    pub sql: &'a str,
    pub parameters: &'a [(String, Value)],
    pub timeout: Duration,
    /// Hint that rows may be streamed column by column.
    pub sequential_access: bool,
}

impl<'a> DriverCommand<'a> {
    pub fn new(sql: &'a str, parameters: &'a [(String, Value)], timeout: Duration) -> Self {
        Self {
            sql,
            parameters,
            timeout,
            sequential_access: false,
        }
    }

    pub fn sequential(mut self) -> Self {
        self.sequential_access = true;
        self
    }
}

/// A trait that unifies database connections and transactions.
///
/// All calls block the calling thread. Implementations bind `parameters` by
/// name and must release any per-command resources before returning, on
/// both the success and the error path.
pub trait Driver {
    /// Implementation kind used for automatic dialect selection
    /// (e.g. `"SQLiteConnection"`, `"SqlConnection"`).
    fn kind(&self) -> &str;

    /// Execute a statement and return the number of affected rows.
    fn execute_non_query(&self, command: &DriverCommand<'_>) -> Result<u64, DriverError>;

    /// Execute a statement and return the first column of the first row.
    ///
    /// Returns [`Value::Null`] when the statement produced no rows.
    fn execute_scalar(&self, command: &DriverCommand<'_>) -> Result<Value, DriverError>;

    /// Execute a query and return all rows.
    fn execute_reader(&self, command: &DriverCommand<'_>) -> Result<Vec<Row>, DriverError>;
}

impl<D: Driver + ?Sized> Driver for &D {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn execute_non_query(&self, command: &DriverCommand<'_>) -> Result<u64, DriverError> {
        (**self).execute_non_query(command)
    }

    fn execute_scalar(&self, command: &DriverCommand<'_>) -> Result<Value, DriverError> {
        (**self).execute_scalar(command)
    }

    fn execute_reader(&self, command: &DriverCommand<'_>) -> Result<Vec<Row>, DriverError> {
        (**self).execute_reader(command)
    }
}

/// One result row: column names and values side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from parallel column/value lists.
    ///
    /// Extra values beyond the number of columns are dropped.
    pub fn new(columns: Vec<String>, mut values: Vec<Value>) -> Self {
        values.truncate(columns.len());
        values.resize(columns.len(), Value::Null);
        Self { columns, values }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let (columns, values) = pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        Self { columns, values }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, matched case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Value of a column, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index_of(name).map(|i| &self.values[i])
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}
