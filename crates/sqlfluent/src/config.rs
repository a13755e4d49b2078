use crate::dialect::Dialect;
use crate::trace::SqlTracer;
use std::time::Duration;

/// Default per-command timeout handed to the driver.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every command opened through a session.
#[derive(Debug, Clone)]
pub struct SqlConfig {
    /// Timeout passed straight through to the driver on every call.
    pub command_timeout: Duration,
    /// Explicit dialect. `None` selects one from the driver kind.
    pub dialect: Option<Dialect>,
    /// Send WHERE values as `@wN` parameters instead of inline literals.
    ///
    /// Off by default: clauses embed their values as unescaped literals.
    pub bind_predicates: bool,
    pub tracer: SqlTracer,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            dialect: None,
            bind_predicates: false,
            tracer: SqlTracer::default(),
        }
    }
}

impl SqlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Use `dialect` instead of selecting one from the driver kind.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Select the dialect from the driver kind (the default).
    pub fn with_automatic_dialect(mut self) -> Self {
        self.dialect = None;
        self
    }

    /// Bind WHERE values as parameters. NULL comparisons stay literal
    /// (`IS NULL` / `IS NOT NULL`).
    pub fn with_bound_predicates(mut self) -> Self {
        self.bind_predicates = true;
        self
    }

    pub fn with_tracer(mut self, tracer: SqlTracer) -> Self {
        self.tracer = tracer;
        self
    }
}
