// ==========================================
// Hierarchy repository - groups / units / sub_components
// ==========================================
// All writes are get-or-create by natural key and run inside the
// caller's transaction, so the id lookup after an INSERT OR IGNORE
// cannot race with another connection.
// ==========================================

use crate::domain::{Group, SubComponent, Unit};
use crate::repository::error::RepositoryResult;
use rusqlite::{params, Connection, Transaction};

/// Outcome of a get-or-create: the surrogate id, and whether this call
/// actually inserted the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upserted {
    pub id: i64,
    pub created: bool,
}

/// Write access to the three hierarchy tables, scoped to one transaction.
pub struct HierarchyRepository<'tx> {
    tx: &'tx Transaction<'tx>,
}

impl<'tx> HierarchyRepository<'tx> {
    pub fn new(tx: &'tx Transaction<'tx>) -> Self {
        Self { tx }
    }

    /// Get-or-create a group by name.
    pub fn get_or_create_group(&self, name: &str) -> RepositoryResult<Upserted> {
        self.tx
            .execute("INSERT OR IGNORE INTO groups (name) VALUES (?1)", [name])?;
        let created = self.tx.changes() == 1;
        let id = if created {
            self.tx.last_insert_rowid()
        } else {
            self.tx
                .query_row("SELECT id FROM groups WHERE name = ?1", [name], |row| {
                    row.get(0)
                })?
        };
        Ok(Upserted { id, created })
    }

    /// Get-or-create a unit by (group, name).
    pub fn get_or_create_unit(&self, group_id: i64, name: &str) -> RepositoryResult<Upserted> {
        self.tx.execute(
            "INSERT OR IGNORE INTO units (group_id, name) VALUES (?1, ?2)",
            params![group_id, name],
        )?;
        let created = self.tx.changes() == 1;
        let id = if created {
            self.tx.last_insert_rowid()
        } else {
            self.tx.query_row(
                "SELECT id FROM units WHERE group_id = ?1 AND name = ?2",
                params![group_id, name],
                |row| row.get(0),
            )?
        };
        Ok(Upserted { id, created })
    }

    /// Get-or-create a sub-component by (unit, name).
    pub fn get_or_create_sub_component(
        &self,
        unit_id: i64,
        name: &str,
    ) -> RepositoryResult<Upserted> {
        self.tx.execute(
            "INSERT OR IGNORE INTO sub_components (unit_id, name) VALUES (?1, ?2)",
            params![unit_id, name],
        )?;
        let created = self.tx.changes() == 1;
        let id = if created {
            self.tx.last_insert_rowid()
        } else {
            self.tx.query_row(
                "SELECT id FROM sub_components WHERE unit_id = ?1 AND name = ?2",
                params![unit_id, name],
                |row| row.get(0),
            )?
        };
        Ok(Upserted { id, created })
    }
}

// ===== read helpers (no transaction required) =====

pub fn list_groups(conn: &Connection) -> RepositoryResult<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM groups ORDER BY id")?;
    let groups = stmt
        .query_map([], |row| {
            Ok(Group {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(groups)
}

pub fn units_of(conn: &Connection, group_id: i64) -> RepositoryResult<Vec<Unit>> {
    let mut stmt =
        conn.prepare("SELECT id, group_id, name FROM units WHERE group_id = ?1 ORDER BY id")?;
    let units = stmt
        .query_map([group_id], |row| {
            Ok(Unit {
                id: row.get(0)?,
                group_id: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(units)
}

pub fn sub_components_of(conn: &Connection, unit_id: i64) -> RepositoryResult<Vec<SubComponent>> {
    let mut stmt = conn
        .prepare("SELECT id, unit_id, name FROM sub_components WHERE unit_id = ?1 ORDER BY id")?;
    let parts = stmt
        .query_map([unit_id], |row| {
            Ok(SubComponent {
                id: row.get(0)?,
                unit_id: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts)
}
