use super::SqlDialect;

/// SQLite: appends `SELECT last_insert_rowid();` to inserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identity_retrieval(&self) -> Option<&'static str> {
        Some("SELECT last_insert_rowid();")
    }
}
