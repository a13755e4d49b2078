//! Error types for sqlfluent

use crate::driver::DriverError;
use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias for sqlfluent operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for building and executing commands
#[derive(Debug, Error)]
pub enum OrmError {
    /// A selector or predicate has a shape the analyzer cannot translate.
    ///
    /// Raised while the command is being built, never at execution time.
    #[error("Can't create {context} from expression type: {kind}")]
    ExpressionShape { kind: String, context: &'static str },

    /// Automatic dialect selection met a driver kind it does not know.
    #[error("Can't create a dialect for driver kind: {0}")]
    UnsupportedDriver(String),

    /// A column parameter and a bound WHERE value share a name.
    #[error("Parameter {0} is bound by both a column and a WHERE clause")]
    DuplicateParameter(String),

    /// A driver call failed; carries the rendered SQL and bound parameters.
    #[error(transparent)]
    DataOperation(Box<DataOperationError>),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Error reported by the underlying driver
    #[error("Driver error: {0}")]
    Driver(DriverError),
}

impl OrmError {
    /// Create an expression shape error for the given node kind.
    pub fn expression_shape(kind: impl Into<String>, context: &'static str) -> Self {
        Self::ExpressionShape {
            kind: kind.into(),
            context,
        }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Wrap `self` together with the SQL and parameters that produced it.
    pub fn with_context(self, sql: impl Into<String>, parameters: Vec<(String, Value)>) -> Self {
        Self::DataOperation(Box::new(DataOperationError {
            source: self,
            sql: sql.into(),
            parameters,
        }))
    }

    /// Check if this is an expression shape error
    pub fn is_expression_shape(&self) -> bool {
        matches!(self, Self::ExpressionShape { .. })
    }

    /// Check if this is an unsupported driver error
    pub fn is_unsupported_driver(&self) -> bool {
        matches!(self, Self::UnsupportedDriver(_))
    }

    /// Check if this is a data operation error
    pub fn is_data_operation(&self) -> bool {
        matches!(self, Self::DataOperation(_))
    }

    /// Borrow the data operation details, if this is one.
    pub fn as_data_operation(&self) -> Option<&DataOperationError> {
        match self {
            Self::DataOperation(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<DriverError> for OrmError {
    fn from(err: DriverError) -> Self {
        Self::Driver(err)
    }
}

/// A failed execution together with the SQL text and parameters that were sent.
#[derive(Debug)]
pub struct DataOperationError {
    source: OrmError,
    sql: String,
    parameters: Vec<(String, Value)>,
}

impl DataOperationError {
    /// The SQL text that was running.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The parameters bound to the command, in binding order.
    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    /// The underlying failure.
    pub fn inner(&self) -> &OrmError {
        &self.source
    }
}

impl fmt::Display for DataOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SQL Data Exception:")?;
        writeln!(f, "{}", self.source)?;
        writeln!(f)?;
        writeln!(f, "Running SQL:")?;
        writeln!(f, "{}", self.sql)?;

        if !self.parameters.is_empty() {
            writeln!(f)?;
            writeln!(f, "Parameters:")?;
            writeln!(f)?;
            for (name, value) in &self.parameters {
                writeln!(f, "{name} = '{value}'")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for DataOperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
