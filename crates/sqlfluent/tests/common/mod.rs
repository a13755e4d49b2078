//! Shared test driver: records every command and replays canned results.

#![allow(dead_code)]

use sqlfluent::{Driver, DriverCommand, DriverError, Row, Value};
use std::cell::RefCell;
use std::time::Duration;

/// A command as the driver saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub sql: String,
    pub parameters: Vec<(String, Value)>,
    pub timeout: Duration,
    pub sequential_access: bool,
}

pub struct RecordingDriver {
    kind: String,
    pub rows: Vec<Row>,
    pub scalar: Value,
    pub affected: u64,
    pub failure: Option<String>,
    log: RefCell<Vec<Recorded>>,
}

impl RecordingDriver {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            rows: Vec::new(),
            scalar: Value::Null,
            affected: 0,
            failure: None,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn sqlite() -> Self {
        Self::new("SQLiteConnection")
    }

    pub fn mssql() -> Self {
        Self::new("SqlConnection")
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_scalar(mut self, value: Value) -> Self {
        self.scalar = value;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn commands(&self) -> Vec<Recorded> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Recorded {
        self.log
            .borrow()
            .last()
            .cloned()
            .expect("no command was executed")
    }

    fn record(&self, command: &DriverCommand<'_>) -> Result<(), DriverError> {
        self.log.borrow_mut().push(Recorded {
            sql: command.sql.to_string(),
            parameters: command.parameters.to_vec(),
            timeout: command.timeout,
            sequential_access: command.sequential_access,
        });
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl Driver for RecordingDriver {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn execute_non_query(&self, command: &DriverCommand<'_>) -> Result<u64, DriverError> {
        self.record(command)?;
        Ok(self.affected)
    }

    fn execute_scalar(&self, command: &DriverCommand<'_>) -> Result<Value, DriverError> {
        self.record(command)?;
        Ok(self.scalar.clone())
    }

    fn execute_reader(&self, command: &DriverCommand<'_>) -> Result<Vec<Row>, DriverError> {
        self.record(command)?;
        Ok(self.rows.clone())
    }
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}
