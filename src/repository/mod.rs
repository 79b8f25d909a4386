// ==========================================
// Data repository layer
// ==========================================
// Responsibility: data access, hides database details.
// Constraint: all values are bound as parameters; identifiers are
// validated before they may appear in SQL text.
// ==========================================

pub mod error;
pub mod hierarchy_repo;
pub mod schema;

pub use error::{RepositoryError, RepositoryResult};
pub use hierarchy_repo::{list_groups, sub_components_of, units_of, HierarchyRepository, Upserted};
pub use schema::{table_columns, validate_identifier};
