use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::app::ports::TableSourcePort;
use crate::error::{ExtractError, Result};
use crate::types::{CellValue, SourceTable};

/// Loads the first sheet of a workbook (xlsx/xlsm/xls/xlsb/ods) or a CSV export of it
pub struct WorkbookInputAdapter {
    path: PathBuf,
}

impl WorkbookInputAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_csv(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    }

    fn load_workbook(&self) -> Result<SourceTable> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ExtractError::EmptyWorkbook {
                path: self.path.clone(),
            })?;
        debug!(sheet = %sheet_name, "Reading first sheet");

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::EmptyWorkbook {
                path: self.path.clone(),
            })??;

        Ok(range_to_table(&range))
    }

    fn load_csv(&self) -> Result<SourceTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::from).collect());
        }

        Ok(SourceTable::new(headers, rows))
    }
}

impl TableSourcePort for WorkbookInputAdapter {
    fn load(&self) -> Result<SourceTable> {
        if !self.path.exists() {
            return Err(ExtractError::InputNotFound {
                path: self.path.clone(),
            });
        }

        let table = if self.is_csv() {
            self.load_csv()?
        } else {
            self.load_workbook()?
        };

        info!(
            path = %self.path.display(),
            columns = table.columns().len(),
            rows = table.len(),
            "Loaded source table"
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// First row is the header; the rest are data rows
fn range_to_table(range: &Range<Data>) -> SourceTable {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return SourceTable::default(),
    };
    let data = rows.map(|r| r.iter().map(to_cell).collect()).collect();
    SourceTable::new(headers, data)
}

fn header_text(cell: &Data) -> String {
    to_cell(cell)
        .as_text()
        .map(|s| s.into_owned())
        .unwrap_or_default()
}

fn to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn load_table(path: &Path) -> Result<SourceTable> {
        WorkbookInputAdapter::new(path).load()
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_table(&dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(err, ExtractError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_csv_export_is_read_with_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        fs::write(
            &path,
            "School,Division,Men's Cross Country\nAcme State,II,Y\nShort Row,III\n",
        )
        .unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.columns(), &["School", "Division", "Men's Cross Country"]);
        assert_eq!(table.len(), 2);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("Men's Cross Country").trimmed(), "Y");
        assert_eq!(rows[1].get("Men's Cross Country"), &CellValue::Empty);
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(to_cell(&Data::Float(1.0)).as_text().unwrap(), "1");
        assert_eq!(to_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(to_cell(&Data::Empty), CellValue::Empty);
    }
}
