//! SQL text rendering per statement kind.
//!
//! [`SqlDialect`] provides the base renderers as provided methods; engine
//! variants override the hooks ([`identity_retrieval`](SqlDialect::identity_retrieval),
//! [`no_lock_hint`](SqlDialect::no_lock_hint)) or whole renderers. [`Dialect`]
//! is the closed set of variants a command can be built with.

mod mssql;
mod sqlite;

pub use mssql::MsSqlDialect;
pub use sqlite::SqliteDialect;

use crate::command::CommandState;
use crate::error::{OrmError, OrmResult};
use crate::reflect::{Reflect, resolve_path};

/// Renders accumulated command state into SQL text.
///
/// All renderers are pure functions of the state.
pub trait SqlDialect {
    fn name(&self) -> &'static str;

    /// Statement appended to every INSERT to return the new identity.
    fn identity_retrieval(&self) -> Option<&'static str> {
        None
    }

    /// Table hint rendered after `FROM <table>` when a select asks for it.
    fn no_lock_hint(&self) -> Option<&'static str> {
        None
    }

    /// `INSERT INTO <t>\n(<cols>)\nVALUES (<params>);<identity>`
    fn insert(&self, state: &CommandState) -> String {
        let mut sql = String::new();
        sql.push_str("INSERT INTO ");
        sql.push_str(&state.table);
        sql.push_str("\n(");
        sql.push_str(&column_list(state));
        sql.push_str(")\nVALUES (");
        sql.push_str(
            &state
                .columns
                .iter()
                .map(|c| c.parameter_name.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", "),
        );
        sql.push_str(");");
        if let Some(identity) = self.identity_retrieval() {
            sql.push_str(identity);
        }
        sql
    }

    /// `SELECT <cols> FROM <t>[ <hint>][ WHERE ...][ ORDER BY ...]`
    fn select(&self, state: &CommandState) -> String {
        let mut sql = format!("SELECT {} FROM {}", column_list(state), state.table);
        if state.no_lock
            && let Some(hint) = self.no_lock_hint()
        {
            sql.push(' ');
            sql.push_str(hint);
        }
        push_where(&mut sql, state);
        if !state.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(
                &state
                    .orders
                    .iter()
                    .map(|o| o.column.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        sql
    }

    /// `UPDATE <t> SET c = @p[, ...][ WHERE ...]`
    fn update(&self, state: &CommandState) -> String {
        let assignments: Vec<String> = state.columns.iter().map(|c| c.assignment()).collect();
        let mut sql = format!("UPDATE {} SET {}", state.table, assignments.join(", "));
        push_where(&mut sql, state);
        sql
    }

    /// `DELETE <t>[ WHERE ...]`
    fn delete(&self, state: &CommandState) -> String {
        let mut sql = format!("DELETE {}", state.table);
        push_where(&mut sql, state);
        sql
    }

    /// One INSERT carrying a literal tuple per row.
    ///
    /// Values are resolved per row from each column's property path and
    /// embedded with the inline literal rules, strings unescaped. With no
    /// rows the statement ends at `VALUES`.
    fn bulk_insert(&self, state: &CommandState, rows: &[&dyn Reflect]) -> String {
        let mut sql = format!("INSERT INTO {}\n({})\nVALUES", state.table, column_list(state));
        let tuples: Vec<String> = rows
            .iter()
            .map(|row| {
                let literals: Vec<String> = state
                    .columns
                    .iter()
                    .map(|c| resolve_path(*row, &c.property_path).to_sql_literal())
                    .collect();
                format!(" ({})", literals.join(", "))
            })
            .collect();
        sql.push_str(&tuples.join(",\n"));
        sql
    }
}

fn column_list(state: &CommandState) -> String {
    state
        .columns
        .iter()
        .map(|c| c.column_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append ` WHERE a AND b ...` when the state has clauses.
fn push_where(sql: &mut String, state: &CommandState) {
    for (i, clause) in state.clauses.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        sql.push_str(&clause.render());
    }
}

/// Base renderers only: no identity suffix, no table hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl SqlDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

/// The closed set of dialects a command can render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    MsSql,
    Generic,
}

/// Driver kinds recognised by [`Dialect::from_driver_kind`].
pub const KNOWN_DRIVERS: &[(&str, Dialect)] = &[
    ("SQLiteConnection", Dialect::Sqlite),
    ("sqlite", Dialect::Sqlite),
    ("SqlConnection", Dialect::MsSql),
    ("mssql", Dialect::MsSql),
];

impl Dialect {
    /// Pick a dialect from a driver's reported kind. Matching is exact.
    pub fn from_driver_kind(kind: &str) -> OrmResult<Self> {
        KNOWN_DRIVERS
            .iter()
            .find(|(known, _)| *known == kind)
            .map(|(_, dialect)| *dialect)
            .ok_or_else(|| OrmError::UnsupportedDriver(kind.to_string()))
    }

    fn renderer(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Sqlite => &SqliteDialect,
            Dialect::MsSql => &MsSqlDialect,
            Dialect::Generic => &GenericDialect,
        }
    }
}

impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.renderer().name()
    }

    fn identity_retrieval(&self) -> Option<&'static str> {
        self.renderer().identity_retrieval()
    }

    fn no_lock_hint(&self) -> Option<&'static str> {
        self.renderer().no_lock_hint()
    }

    fn insert(&self, state: &CommandState) -> String {
        self.renderer().insert(state)
    }

    fn select(&self, state: &CommandState) -> String {
        self.renderer().select(state)
    }

    fn update(&self, state: &CommandState) -> String {
        self.renderer().update(state)
    }

    fn delete(&self, state: &CommandState) -> String {
        self.renderer().delete(state)
    }

    fn bulk_insert(&self, state: &CommandState, rows: &[&dyn Reflect]) -> String {
        self.renderer().bulk_insert(state, rows)
    }
}
