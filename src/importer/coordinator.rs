// ==========================================
// Import coordinator
// ==========================================
// Orchestrates one import call end to end: open the source, acquire
// one store connection for the duration of the call, run the sheets
// or rows, and return a summary. Fatal conditions (unreadable source,
// unknown table) abort before any write; everything else is counted
// and reported.
// ==========================================

use crate::config::ImportConfig;
use crate::db::open_sqlite_connection;
use crate::importer::bulk_loader::BulkLoader;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::hierarchy_builder::HierarchyBuilder;
use crate::importer::reconciler::{reconcile, Reconciliation};
use crate::importer::summary::{
    BulkLoadSummary, HierarchyImportSummary, SheetCounts, SheetOutcome, SheetReport,
};
use crate::importer::workbook::Workbook;
use crate::repository::table_columns;
use chrono::Utc;
use std::path::Path;

/// Build the Group/Unit/SubComponent hierarchy from every data sheet
/// of `source`.
///
/// A damaged sheet is recorded as failed and the remaining sheets are
/// still attempted; only an unreadable source or a failed connection
/// aborts the call.
pub fn import_hierarchy<P: AsRef<Path>>(
    source: P,
    db_path: &str,
    config: &ImportConfig,
) -> ImportResult<HierarchyImportSummary> {
    let source = source.as_ref();
    let started_at = Utc::now();

    let mut workbook = Workbook::open(source)?;
    let mut conn = open_sqlite_connection(db_path)
        .map_err(|e| ImportError::DatabaseConnectionError(e.to_string()))?;

    tracing::info!(source = %source.display(), db = db_path, "hierarchy import started");

    let builder = HierarchyBuilder::new(config);
    let mut summary = HierarchyImportSummary {
        source: source.display().to_string(),
        started_at,
        finished_at: started_at,
        sheets: Vec::new(),
        groups_created: 0,
        units_created: 0,
        sub_components_created: 0,
        orphan_cells: 0,
        sheets_failed: 0,
    };

    for sheet_name in workbook.sheet_names() {
        let outcome = match builder.import_sheet(&mut conn, &mut workbook, &sheet_name) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(sheet = %sheet_name, error = %e, "sheet import failed");
                summary.sheets_failed += 1;
                SheetOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        if let SheetOutcome::Imported { counts } = &outcome {
            add_counts(&mut summary, counts);
        }
        summary.sheets.push(SheetReport {
            sheet: sheet_name,
            outcome,
        });
    }

    summary.finished_at = Utc::now();
    tracing::info!(
        groups = summary.groups_created,
        units = summary.units_created,
        sub_components = summary.sub_components_created,
        failed_sheets = summary.sheets_failed,
        "hierarchy import finished"
    );
    Ok(summary)
}

fn add_counts(summary: &mut HierarchyImportSummary, counts: &SheetCounts) {
    summary.groups_created += counts.groups_created;
    summary.units_created += counts.units_created;
    summary.sub_components_created += counts.sub_components_created;
    summary.orphan_cells += counts.orphan_cells;
}

/// Load the first sheet of `source` into `table`, matching header
/// names case-insensitively against the table's columns.
///
/// Fatal before any write: unreadable source, unknown table. A header
/// with no matching columns is reported in the summary, not raised.
pub fn bulk_load<P: AsRef<Path>>(
    source: P,
    db_path: &str,
    table: &str,
) -> ImportResult<BulkLoadSummary> {
    let source = source.as_ref();
    let started_at = Utc::now();

    let mut workbook = Workbook::open(source)?;
    let mut conn = open_sqlite_connection(db_path)
        .map_err(|e| ImportError::DatabaseConnectionError(e.to_string()))?;

    let columns = table_columns(&conn, table)?;

    let sheet_name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| ImportError::SourceUnreadable {
            path: source.display().to_string(),
            message: "workbook has no sheets".to_string(),
        })?;

    tracing::info!(
        source = %source.display(),
        sheet = %sheet_name,
        table,
        "bulk load started"
    );

    let header = workbook
        .rows(&sheet_name, 1, Some(1))?
        .next()
        .map(|(_, cells)| cells)
        .unwrap_or_default();

    let reconciliation: Reconciliation = reconcile(&header, &columns);

    let mut summary = BulkLoadSummary {
        source: source.display().to_string(),
        table: table.to_string(),
        started_at,
        finished_at: started_at,
        no_column_overlap: false,
        columns: reconciliation.common_columns.clone(),
        inserted: 0,
        skipped_blank: 0,
        failures: Vec::new(),
    };

    if reconciliation.is_empty() {
        tracing::warn!(
            source = %source.display(),
            table,
            "no common columns between header and table, nothing loaded"
        );
        summary.no_column_overlap = true;
        summary.finished_at = Utc::now();
        return Ok(summary);
    }

    let rows = workbook.rows(&sheet_name, 2, None)?;
    let report = BulkLoader::load(&mut conn, table, &reconciliation, rows)?;

    summary.inserted = report.inserted;
    summary.skipped_blank = report.skipped_blank;
    summary.failures = report.failures;
    summary.finished_at = Utc::now();

    tracing::info!(
        table,
        inserted = summary.inserted,
        failed = summary.failed(),
        "bulk load finished"
    );
    Ok(summary)
}
