// ==========================================
// Reference-data hierarchy entities
// ==========================================
// Three-level tree: Group -> Unit -> SubComponent.
// Natural key at each level is the trimmed name within its parent;
// surrogate ids are generated by the store.
// ==========================================

use serde::{Deserialize, Serialize};

/// Top-level grouping, derived from a sheet name (e.g. a department).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// Mid-level entity, derived from the header row of a sheet
/// (e.g. a piece of equipment), scoped to one Group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
}

/// Leaf entity, derived from data rows, scoped to one Unit via the
/// column position it was found in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubComponent {
    pub id: i64,
    pub unit_id: i64,
    pub name: String,
}
