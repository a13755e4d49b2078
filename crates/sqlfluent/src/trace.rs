//! SQL logging through `tracing`.
//!
//! Every command execution emits one event under the `sqlfluent.sql` target
//! **before** the driver is called; driver failures are logged at `warn`.
//! Events carry the parameter count, never parameter values.
//! Without the `tracing` feature the tracer is an empty no-op.

use crate::params::Parameters;

/// Kind of driver call being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    NonQuery,
    Scalar,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::NonQuery => "non_query",
            Operation::Scalar => "scalar",
        }
    }
}

#[cfg(feature = "tracing")]
pub use enabled::SqlTracer;

#[cfg(not(feature = "tracing"))]
pub use disabled::SqlTracer;

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg(feature = "tracing")]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(feature = "tracing")]
mod enabled {
    use super::{Operation, Parameters, truncate_sql_bytes};
    use tracing::Level;

    /// Emits the SQL about to run as a `tracing` event.
    #[derive(Debug, Clone)]
    pub struct SqlTracer {
        /// Event level for executed statements.
        pub level: Level,
        /// Truncate long SQL strings (in bytes). `None` means no truncation.
        pub max_sql_length: Option<usize>,
    }

    impl Default for SqlTracer {
        fn default() -> Self {
            Self {
                level: Level::DEBUG,
                max_sql_length: Some(200),
            }
        }
    }

    impl SqlTracer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        pub fn max_sql_length(mut self, len: usize) -> Self {
            self.max_sql_length = Some(len);
            self
        }

        pub fn no_truncate(mut self) -> Self {
            self.max_sql_length = None;
            self
        }

        pub(crate) fn truncate_sql(&self, sql: &str) -> String {
            match self.max_sql_length {
                Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
                _ => sql.to_string(),
            }
        }

        pub(crate) fn before(&self, operation: Operation, sql: &str, params: &Parameters) {
            macro_rules! emit_at_level {
                ($level:expr, $($field:tt)*) => {
                    match $level {
                        Level::ERROR => tracing::error!($($field)*),
                        Level::WARN  => tracing::warn!($($field)*),
                        Level::INFO  => tracing::info!($($field)*),
                        Level::DEBUG => tracing::debug!($($field)*),
                        Level::TRACE => tracing::trace!($($field)*),
                    }
                };
            }

            let sql = self.truncate_sql(sql);
            let param_count = params.len();
            emit_at_level!(
                self.level,
                target: "sqlfluent.sql",
                operation = operation.as_str(),
                param_count,
                sql = %sql
            );
        }

        pub(crate) fn failed(&self, operation: Operation, sql: &str, error: &dyn std::fmt::Display) {
            tracing::warn!(
                target: "sqlfluent.sql",
                operation = operation.as_str(),
                sql = %self.truncate_sql(sql),
                error = %error,
                "sql command failed"
            );
        }
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use super::{Operation, Parameters};

    #[derive(Debug, Clone, Default)]
    pub struct SqlTracer;

    impl SqlTracer {
        pub fn new() -> Self {
            Self
        }

        pub(crate) fn before(&self, _operation: Operation, _sql: &str, _params: &Parameters) {}

        pub(crate) fn failed(&self, _operation: Operation, _sql: &str, _error: &dyn std::fmt::Display) {}
    }
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn events_carry_parameter_count_not_values() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let params = Parameters::new()
            .with("@Name", "Bob")
            .with("@Secret", "hunter2");

        tracing::subscriber::with_default(subscriber, || {
            SqlTracer::new().before(
                Operation::NonQuery,
                "UPDATE [Person] SET [Name] = @Name, [Secret] = @Secret",
                &params,
            );
        });

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("sqlfluent.sql"));
        assert!(out.contains("non_query"));
        assert!(out.contains("param_count=2"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("Bob"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT", 10), "SELECT");
        assert_eq!(truncate_sql_bytes("SELECT", 3), "SEL");
        assert_eq!(truncate_sql_bytes("é", 1), "");
    }

    #[test]
    fn tracer_truncates_long_sql() {
        let tracer = SqlTracer::new().max_sql_length(6);
        assert_eq!(tracer.truncate_sql("SELECT * FROM [Person]"), "SELECT...");
        assert_eq!(tracer.no_truncate().truncate_sql("SELECT 1"), "SELECT 1");
    }
}
