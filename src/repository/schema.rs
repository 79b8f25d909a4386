// ==========================================
// Schema introspection
// ==========================================
// Reads a target table's column list from the SQLite catalog.
// Constraint: identifiers reaching SQL text must pass validation first;
// everything else stays parameterized.
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;

/// Validate a SQL identifier (table or column name).
///
/// Only `[A-Za-z_][A-Za-z0-9_]*` is accepted. Identifiers are the one
/// thing that cannot be bound as a statement parameter, so anything
/// spliced into SQL text has to go through here.
pub fn validate_identifier(name: &str) -> RepositoryResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidIdentifier(name.to_string()))
    }
}

/// Column names of `table` in declaration order.
///
/// Fails with `UnknownTable` if the table does not exist (PRAGMA
/// table_info returns no rows for unknown tables).
pub fn table_columns(conn: &Connection, table: &str) -> RepositoryResult<Vec<String>> {
    validate_identifier(table)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepositoryError::UnknownTable(table.to_string()));
    }
    Ok(columns)
}
