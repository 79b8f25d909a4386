// ==========================================
// Bulk loader
// ==========================================
// Parameterized inserts of reconciled source rows into a named table.
// One transaction per load; a single bad row is recorded and skipped,
// it does not abort the transaction.
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::reconciler::Reconciliation;
use crate::importer::summary::{RowFailure, RowOutcome};
use crate::importer::workbook::{CellValue, Row};
use crate::repository::validate_identifier;
use rusqlite::{params_from_iter, Connection};

/// Aggregated result of one bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped_blank: usize,
    pub failures: Vec<RowFailure>,
}

/// Quote an identifier for SQL text. Column names come from the store's
/// own catalog, so quoting (with embedded quotes doubled) is enough.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub struct BulkLoader;

impl BulkLoader {
    /// Insert every data row into `table` over the reconciled columns.
    ///
    /// Short rows are padded with NULL for the missing trailing
    /// columns; fully blank rows are skipped; a failed insert is
    /// logged with the offending data and counted, and loading
    /// continues with the next row.
    pub fn load(
        conn: &mut Connection,
        table: &str,
        reconciliation: &Reconciliation,
        rows: impl Iterator<Item = Row>,
    ) -> ImportResult<LoadReport> {
        validate_identifier(table)?;

        let columns = &reconciliation.common_columns;
        let column_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            column_list,
            placeholders
        );

        let mut report = LoadReport::default();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;

            for (row_no, cells) in rows {
                let outcome = if cells.iter().all(CellValue::is_empty) {
                    RowOutcome::SkippedBlank
                } else {
                    let values: Vec<CellValue> = columns
                        .iter()
                        .map(|column| {
                            reconciliation
                                .source_index(column)
                                .and_then(|i| cells.get(i))
                                .cloned()
                                .unwrap_or(CellValue::Empty)
                        })
                        .collect();

                    match stmt.execute(params_from_iter(values.iter())) {
                        Ok(_) => RowOutcome::Inserted,
                        Err(e) => RowOutcome::Failed(RowFailure {
                            row: row_no,
                            reason: e.to_string(),
                            raw: cells,
                        }),
                    }
                };

                match outcome {
                    RowOutcome::Inserted => report.inserted += 1,
                    RowOutcome::SkippedBlank => report.skipped_blank += 1,
                    RowOutcome::Failed(failure) => {
                        tracing::warn!(
                            table,
                            row = failure.row,
                            reason = %failure.reason,
                            raw = ?failure.raw,
                            "row insert failed, skipped"
                        );
                        report.failures.push(failure);
                    }
                }
            }
        }
        tx.commit()?;

        Ok(report)
    }
}
