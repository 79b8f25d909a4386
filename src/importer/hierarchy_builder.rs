// ==========================================
// Hierarchy builder
// ==========================================
// Converts one sheet into Group / Unit / SubComponent rows:
//   sheet name -> group, row 1 -> units (left to right),
//   rows 2.. -> sub-components attached by column position.
// One transaction per sheet; get-or-create semantics make re-imports
// idempotent.
// ==========================================

use crate::config::ImportConfig;
use crate::importer::error::ImportResult;
use crate::importer::summary::{SheetCounts, SheetOutcome, SkipReason};
use crate::importer::workbook::Workbook;
use crate::repository::HierarchyRepository;
use rusqlite::Connection;

/// Ordered mapping `column index -> unit id`, built once per sheet from
/// row 1. Columns whose header cell is empty carry no unit; data cells
/// under them (or beyond the row-1 width) cannot be attached.
#[derive(Debug, Default)]
pub struct UnitColumnMap {
    units: Vec<Option<i64>>,
}

impl UnitColumnMap {
    pub fn push(&mut self, unit_id: Option<i64>) {
        self.units.push(unit_id);
    }

    pub fn unit_for_column(&self, column: usize) -> Option<i64> {
        self.units.get(column).copied().flatten()
    }

    pub fn width(&self) -> usize {
        self.units.len()
    }

    pub fn has_units(&self) -> bool {
        self.units.iter().any(|u| u.is_some())
    }
}

/// Imports hierarchy sheets one at a time.
pub struct HierarchyBuilder<'a> {
    config: &'a ImportConfig,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// Import a single sheet inside one transaction.
    ///
    /// Skip decisions (blank name, skip-list, empty sheet) are outcomes,
    /// not errors; an `Err` here means the sheet's transaction did not
    /// commit and the caller should record the sheet as failed.
    pub fn import_sheet(
        &self,
        conn: &mut Connection,
        workbook: &mut Workbook,
        sheet_name: &str,
    ) -> ImportResult<SheetOutcome> {
        if self.config.is_skipped_sheet(sheet_name) {
            tracing::debug!(sheet = sheet_name, "sheet is on the skip-list");
            return Ok(SheetOutcome::Skipped {
                reason: SkipReason::SkipListed,
            });
        }

        let group_name = sheet_name.trim();
        if group_name.is_empty() {
            return Ok(SheetOutcome::Skipped {
                reason: SkipReason::BlankName,
            });
        }

        let mut rows = workbook.rows(sheet_name, 1, None)?;

        // Units live in row 1 only. A sheet whose first used row is
        // further down has no unit header and is skipped like an empty
        // sheet.
        let header = match rows.next() {
            Some((1, cells)) => cells,
            _ => {
                tracing::warn!(sheet = sheet_name, "sheet has no header row, skipped");
                return Ok(SheetOutcome::Skipped {
                    reason: SkipReason::EmptySheet,
                });
            }
        };

        let mut counts = SheetCounts::default();
        let tx = conn.transaction()?;
        {
            let repo = HierarchyRepository::new(&tx);

            let group = repo.get_or_create_group(group_name)?;
            if group.created {
                counts.groups_created += 1;
            }

            let mut unit_map = UnitColumnMap::default();
            for cell in &header {
                match cell.as_trimmed_text() {
                    Some(unit_name) => {
                        let unit = repo.get_or_create_unit(group.id, &unit_name)?;
                        if unit.created {
                            counts.units_created += 1;
                        }
                        unit_map.push(Some(unit.id));
                    }
                    None => unit_map.push(None),
                }
            }

            if !unit_map.has_units() {
                tracing::warn!(sheet = sheet_name, "header row has no unit names");
            }

            for (row_no, cells) in rows {
                counts.rows_read += 1;
                for (column, cell) in cells.iter().enumerate() {
                    let Some(name) = cell.as_trimmed_text() else {
                        continue;
                    };
                    match unit_map.unit_for_column(column) {
                        Some(unit_id) => {
                            let part = repo.get_or_create_sub_component(unit_id, &name)?;
                            if part.created {
                                counts.sub_components_created += 1;
                            }
                        }
                        None => {
                            counts.orphan_cells += 1;
                            tracing::warn!(
                                sheet = sheet_name,
                                row = row_no,
                                column,
                                value = %name,
                                "cell has no unit in row 1, dropped"
                            );
                        }
                    }
                }
            }
        }
        tx.commit()?;

        tracing::info!(
            sheet = sheet_name,
            groups = counts.groups_created,
            units = counts.units_created,
            sub_components = counts.sub_components_created,
            "reference data imported"
        );
        Ok(SheetOutcome::Imported { counts })
    }
}
