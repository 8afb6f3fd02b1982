use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::constants::{CROSS_COUNTRY, INDOOR_TRACK, MEN, OUTDOOR_TRACK, WOMEN};

/// A single spreadsheet cell as handed over by the input adapter
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Text form of the cell, or `None` for the missing marker.
    /// Integral floats render without a fractional part so `1.0` reads as `"1"`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Int(i) => Some(Cow::Owned(i.to_string())),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(Cow::Owned(format!("{}", *f as i64)))
            }
            CellValue::Float(f) => Some(Cow::Owned(f.to_string())),
            CellValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            CellValue::Empty => None,
        }
    }

    /// Trimmed text, empty string for the missing marker
    pub fn trimmed(&self) -> String {
        self.as_text()
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// First sheet of the input workbook: unique column names plus rows of cells
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    /// Build a table from raw header cells. Headers are trimmed, blank ones become
    /// `Unnamed: <n>` and repeats get `.1`, `.2`, ... so names stay unique.
    pub fn new(raw_headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns = Vec::with_capacity(raw_headers.len());
        let mut index = HashMap::with_capacity(raw_headers.len());

        for (i, raw) in raw_headers.into_iter().enumerate() {
            let base = match raw.trim() {
                "" => format!("Unnamed: {}", i),
                trimmed => trimmed.to_string(),
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while index.contains_key(&name) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            index.insert(name.clone(), i);
            columns.push(name);
        }

        Self {
            columns,
            index,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            table: self,
            cells,
        })
    }
}

/// Borrowed view of one table row, addressed by column name
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a SourceTable,
    cells: &'a [CellValue],
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl<'a> Row<'a> {
    /// Cell under `column`; short rows and unknown columns read as empty
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.table
            .index
            .get(column)
            .and_then(|&i| self.cells.get(i))
            .unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Sport {
    #[serde(rename = "Indoor Track & Field")]
    IndoorTrack,
    #[serde(rename = "Outdoor Track & Field")]
    OutdoorTrack,
    #[serde(rename = "Cross Country")]
    CrossCountry,
}

impl Sport {
    pub fn label(&self) -> &'static str {
        match self {
            Sport::IndoorTrack => INDOOR_TRACK,
            Sport::OutdoorTrack => OUTDOOR_TRACK,
            Sport::CrossCountry => CROSS_COUNTRY,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Men,
    #[serde(rename = "W")]
    Women,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Men => MEN,
            Gender::Women => WOMEN,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One output row: a school sponsoring one sport for one gender.
/// Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SponsorshipRecord {
    pub school_name: String,
    /// Reserved for later enrichment; always empty for now
    pub school_short_name: String,
    pub division: String,
    pub conference: String,
    pub sport: Sport,
    pub gender: Gender,
    pub data_year: u16,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells_render_like_typed_values() {
        assert_eq!(CellValue::Float(1.0).as_text().unwrap(), "1");
        assert_eq!(CellValue::Float(2.5).as_text().unwrap(), "2.5");
        assert_eq!(CellValue::Int(7).as_text().unwrap(), "7");
        assert_eq!(CellValue::Bool(true).as_text().unwrap(), "true");
        assert!(CellValue::Empty.as_text().is_none());
    }

    #[test]
    fn test_headers_are_trimmed_and_made_unique() {
        let table = SourceTable::new(
            vec![
                " School ".to_string(),
                "".to_string(),
                "Division".to_string(),
                "Division".to_string(),
                "Division".to_string(),
            ],
            Vec::new(),
        );
        assert_eq!(
            table.columns(),
            &["School", "Unnamed: 1", "Division", "Division.1", "Division.2"]
        );
    }

    #[test]
    fn test_row_lookup_tolerates_short_rows_and_unknown_columns() {
        let table = SourceTable::new(
            vec!["School".to_string(), "Division".to_string()],
            vec![vec![CellValue::from("Acme State")]],
        );
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("School").trimmed(), "Acme State");
        assert_eq!(row.get("Division"), &CellValue::Empty);
        assert_eq!(row.get("Nope"), &CellValue::Empty);
    }

    #[test]
    fn test_labels_match_serialized_names() {
        assert_eq!(Sport::IndoorTrack.label(), "Indoor Track & Field");
        assert_eq!(Sport::CrossCountry.to_string(), "Cross Country");
        assert_eq!(Gender::Women.code(), "W");
    }
}
