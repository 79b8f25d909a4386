// ==========================================
// Import layer
// ==========================================
// Responsibility: turn external tabular sources into store rows.
// Sources: Excel workbooks, CSV (bulk mode).
// ==========================================

pub mod bulk_loader;
pub mod coordinator;
pub mod error;
pub mod hierarchy_builder;
pub mod reconciler;
pub mod summary;
pub mod workbook;

pub use bulk_loader::{BulkLoader, LoadReport};
pub use coordinator::{bulk_load, import_hierarchy};
pub use error::{ImportError, ImportResult};
pub use hierarchy_builder::{HierarchyBuilder, UnitColumnMap};
pub use reconciler::{reconcile, Reconciliation};
pub use summary::{
    BulkLoadSummary, HierarchyImportSummary, RowFailure, RowOutcome, SheetCounts, SheetOutcome,
    SheetReport, SkipReason,
};
pub use workbook::{CellValue, Row, SheetRows, Workbook};
