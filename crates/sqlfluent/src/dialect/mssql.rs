use super::SqlDialect;

/// SQL Server: `SELECT SCOPE_IDENTITY();` after inserts and `WITH(NOLOCK)`
/// table hints on request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSqlDialect;

impl SqlDialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn identity_retrieval(&self) -> Option<&'static str> {
        Some("SELECT SCOPE_IDENTITY();")
    }

    fn no_lock_hint(&self) -> Option<&'static str> {
        Some("WITH(NOLOCK)")
    }
}
