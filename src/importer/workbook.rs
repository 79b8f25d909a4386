// ==========================================
// Workbook reader
// ==========================================
// Opens a tabular source document and exposes it as an ordered
// sequence of named sheets, each a grid of typed cell values.
// Supports: Excel (.xlsx/.xlsm/.xls) via calamine, CSV (.csv) as a
// single-sheet workbook named after the file stem.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use csv::ReaderBuilder;
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::ToSql;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A single cell of a source document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Trimmed textual content, or None for empty and whitespace-only
    /// cells. Whole numbers render without a decimal point, matching
    /// how they appear in the spreadsheet.
    pub fn as_trimmed_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            CellValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_trimmed_text().is_none()
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
            Data::Error(_) => CellValue::Empty,
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            CellValue::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
            CellValue::Number(n) => Ok(ToSqlOutput::from(*n)),
            CellValue::Empty => Ok(ToSqlOutput::Owned(Value::Null)),
        }
    }
}

/// One row of a sheet: its 1-based absolute row number and the cells.
pub type Row = (u32, Vec<CellValue>);

/// Iterator over the rows of one sheet, produced per `Workbook::rows`
/// call (restartable by calling `rows` again).
#[derive(Debug)]
pub struct SheetRows {
    inner: std::vec::IntoIter<Row>,
}

impl Iterator for SheetRows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.inner.next()
    }
}

enum WorkbookKind {
    Excel(Sheets<BufReader<File>>),
    Csv { name: String, rows: Vec<Vec<CellValue>> },
}

/// An open tabular source document.
pub struct Workbook {
    path: String,
    kind: WorkbookKind,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Workbook {
    /// Open a source document, dispatching on the file extension.
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::SourceUnreadable {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            });
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let kind = match ext.as_str() {
            "xlsx" | "xlsm" | "xls" => {
                let reader = open_workbook_auto(path).map_err(|e| ImportError::SourceUnreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                WorkbookKind::Excel(reader)
            }
            "csv" => {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("csv")
                    .to_string();
                let rows = read_csv_rows(path)?;
                WorkbookKind::Csv { name, rows }
            }
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        Ok(Self {
            path: path.display().to_string(),
            kind,
        })
    }

    /// Sheet names in workbook order. CSV sources expose exactly one
    /// sheet, named after the file stem.
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.kind {
            WorkbookKind::Excel(reader) => reader.sheet_names().to_vec(),
            WorkbookKind::Csv { name, .. } => vec![name.clone()],
        }
    }

    /// Rows of `sheet_name` with absolute row numbers in
    /// `[from_row, to_row]` (1-based, inclusive; `to_row = None` means
    /// to the end of the sheet).
    pub fn rows(
        &mut self,
        sheet_name: &str,
        from_row: u32,
        to_row: Option<u32>,
    ) -> ImportResult<SheetRows> {
        let in_window = |row_no: u32| row_no >= from_row && to_row.map_or(true, |to| row_no <= to);

        let rows: Vec<Row> = match &mut self.kind {
            WorkbookKind::Excel(reader) => {
                if !reader.sheet_names().iter().any(|n| n == sheet_name) {
                    return Err(ImportError::WorksheetNotFound(sheet_name.to_string()));
                }
                let range = reader.worksheet_range(sheet_name).map_err(|e| {
                    ImportError::SourceUnreadable {
                        path: self.path.clone(),
                        message: e.to_string(),
                    }
                })?;

                // calamine ranges start at the first used cell, but row
                // and column positions here are absolute spreadsheet
                // positions: offset the row numbers and pad the leading
                // columns back in.
                let (start_row, start_col) = range.start().unwrap_or((0, 0));
                range
                    .rows()
                    .enumerate()
                    .filter_map(|(i, cells)| {
                        let row_no = start_row + i as u32 + 1;
                        if !in_window(row_no) {
                            return None;
                        }
                        let mut row: Vec<CellValue> =
                            vec![CellValue::Empty; start_col as usize];
                        row.extend(cells.iter().map(CellValue::from));
                        Some((row_no, row))
                    })
                    .collect()
            }
            WorkbookKind::Csv { name, rows } => {
                if name.as_str() != sheet_name {
                    return Err(ImportError::WorksheetNotFound(sheet_name.to_string()));
                }
                rows.iter()
                    .enumerate()
                    .filter_map(|(i, cells)| {
                        let row_no = i as u32 + 1;
                        if in_window(row_no) {
                            Some((row_no, cells.clone()))
                        } else {
                            None
                        }
                    })
                    .collect()
            }
        };

        Ok(SheetRows {
            inner: rows.into_iter(),
        })
    }
}

fn read_csv_rows(path: &Path) -> ImportResult<Vec<Vec<CellValue>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ImportError::SourceUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::SourceUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let cells = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_trimmed_text() {
        assert_eq!(
            CellValue::Text(" Kran ".to_string()).as_trimmed_text(),
            Some("Kran".to_string())
        );
        assert_eq!(CellValue::Text("   ".to_string()).as_trimmed_text(), None);
        assert_eq!(CellValue::Empty.as_trimmed_text(), None);
        assert_eq!(
            CellValue::Number(42.0).as_trimmed_text(),
            Some("42".to_string())
        );
        assert_eq!(
            CellValue::Number(2.5).as_trimmed_text(),
            Some("2.5".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_source_unreadable() {
        let err = Workbook::open("no_such_file.xlsx").unwrap_err();
        assert!(matches!(err, ImportError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".pdf").unwrap();
        let err = Workbook::open(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "pdf"));
    }

    #[test]
    fn test_csv_single_sheet_with_row_window() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "hersteller,typ").unwrap();
        writeln!(file, "Siemens,1LA7").unwrap();
        writeln!(file, "ABB,M2AA").unwrap();

        let mut workbook = Workbook::open(file.path()).unwrap();
        let names = workbook.sheet_names();
        assert_eq!(names.len(), 1);

        let header: Vec<Row> = workbook.rows(&names[0], 1, Some(1)).unwrap().collect();
        assert_eq!(header.len(), 1);
        assert_eq!(header[0].0, 1);
        assert_eq!(header[0].1[0], CellValue::Text("hersteller".to_string()));

        let data: Vec<Row> = workbook.rows(&names[0], 2, None).unwrap().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].0, 2);
        assert_eq!(data[1].0, 3);
    }

    #[test]
    fn test_csv_unknown_sheet() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b").unwrap();

        let mut workbook = Workbook::open(file.path()).unwrap();
        let err = workbook.rows("Tabelle1", 1, None).unwrap_err();
        assert!(matches!(err, ImportError::WorksheetNotFound(_)));
    }
}
