// ==========================================
// Import result summaries
// ==========================================
// Recoverable conditions (skipped sheets, dropped cells, failed rows)
// are accumulated here instead of being raised; every skip or failure
// stays attributable to a specific sheet, row or column.
// ==========================================

use crate::importer::workbook::CellValue;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a sheet produced no hierarchy rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Sheet name was blank after trimming.
    BlankName,
    /// Sheet name is on the configured skip-list.
    SkipListed,
    /// Sheet has no header row in row 1.
    EmptySheet,
}

/// Row counts produced by one hierarchy sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SheetCounts {
    pub groups_created: usize,
    pub units_created: usize,
    pub sub_components_created: usize,
    /// Non-empty cells dropped because their column has no unit in
    /// row 1 (or lies beyond the header row).
    pub orphan_cells: usize,
    pub rows_read: usize,
}

/// Outcome of one sheet of a hierarchy import.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Imported { counts: SheetCounts },
    Skipped { reason: SkipReason },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    #[serde(flatten)]
    pub outcome: SheetOutcome,
}

/// Summary of a whole hierarchy import run.
#[derive(Debug, Serialize)]
pub struct HierarchyImportSummary {
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sheets: Vec<SheetReport>,
    pub groups_created: usize,
    pub units_created: usize,
    pub sub_components_created: usize,
    pub orphan_cells: usize,
    pub sheets_failed: usize,
}

impl HierarchyImportSummary {
    pub fn counts_for(&self, sheet: &str) -> Option<&SheetOutcome> {
        self.sheets
            .iter()
            .find(|r| r.sheet == sheet)
            .map(|r| &r.outcome)
    }
}

/// One data row that failed to insert in bulk mode.
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    /// 1-based absolute row number in the source sheet.
    pub row: u32,
    pub reason: String,
    pub raw: Vec<CellValue>,
}

/// Per-row outcome of the bulk loader.
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Inserted,
    SkippedBlank,
    Failed(RowFailure),
}

/// Summary of a bulk load run.
#[derive(Debug, Serialize)]
pub struct BulkLoadSummary {
    pub source: String,
    pub table: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// True when the header row and the table share no columns; zero
    /// rows are written in that case.
    pub no_column_overlap: bool,
    /// Reconciled columns actually inserted, in table order.
    pub columns: Vec<String>,
    pub inserted: usize,
    pub skipped_blank: usize,
    pub failures: Vec<RowFailure>,
}

impl BulkLoadSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
