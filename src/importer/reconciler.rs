// ==========================================
// Header reconciliation
// ==========================================
// Matches a source header row against a target table's column set.
// Normalization is trim + lowercase on both sides; the resulting column
// list follows the table's own declaration order so generated INSERT
// statements are reproducible.
// ==========================================

use crate::importer::workbook::CellValue;
use std::collections::HashMap;

/// Normalized form used for header/column comparison.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Result of matching a header row against a table's columns.
///
/// An empty intersection is a reportable value, not an error; callers
/// check `is_empty()` and surface a no-overlap condition.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Table columns (original spelling, table declaration order) that
    /// also appear in the header row.
    pub common_columns: Vec<String>,
    /// Normalized header name -> zero-based position in the header row.
    /// On duplicate headers the last occurrence wins.
    pub header_index: HashMap<String, usize>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.common_columns.is_empty()
    }

    /// Source column position for a table column, if the header has it.
    pub fn source_index(&self, table_column: &str) -> Option<usize> {
        self.header_index.get(&normalize(table_column)).copied()
    }
}

/// Compute the ordered intersection of `header_row` and `table_columns`.
pub fn reconcile(header_row: &[CellValue], table_columns: &[String]) -> Reconciliation {
    let mut header_index = HashMap::new();
    for (position, cell) in header_row.iter().enumerate() {
        if let Some(text) = cell.as_trimmed_text() {
            header_index.insert(normalize(&text), position);
        }
    }

    let common_columns = table_columns
        .iter()
        .filter(|column| header_index.contains_key(&normalize(column)))
        .cloned()
        .collect();

    Reconciliation {
        common_columns,
        header_index,
    }
}
