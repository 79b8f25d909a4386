// ==========================================
// SQLite connection initialization
// ==========================================
// Goal:
// - unify PRAGMA behavior for every Connection::open so that foreign keys
//   are enforced on all connections, not just some modules'
// - unify busy_timeout to reduce sporadic busy errors when another
//   process holds the database
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the uniform PRAGMAs to a SQLite connection
///
/// foreign_keys and busy_timeout are per-connection settings and have to
/// be re-applied for every new connection.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the uniform configuration applied
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}
