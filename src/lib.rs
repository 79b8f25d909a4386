// ==========================================
// Reference-data import engine - core library
// ==========================================
// Turns loosely-structured spreadsheet input into rows of a relational
// schema with foreign-key integrity. Two jobs:
// - hierarchy import: sheet name -> group, row 1 -> units,
//   rows 2.. -> sub-components by column position
// - dynamic bulk load: header names matched case-insensitively
//   against a target table's columns
// ==========================================

// Domain layer - entities
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - external data
pub mod importer;

// Configuration
pub mod config;

// Database infrastructure (connection init / uniform PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// Core re-exports
pub use config::ImportConfig;
pub use domain::{Group, SubComponent, Unit};
pub use importer::{
    bulk_load, import_hierarchy, BulkLoadSummary, HierarchyImportSummary, ImportError,
    ImportResult, Workbook,
};
pub use repository::{RepositoryError, RepositoryResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "refdata-import";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
