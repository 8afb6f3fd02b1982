use std::collections::HashSet;
use tracing::{debug, info};

use super::categories::MatchedCategory;
use super::columns::KeyColumns;
use crate::constants::SOURCE_LABEL;
use crate::types::{CellValue, Row, SourceTable, SponsorshipRecord};

const TRUTHY_VALUES: [&str; 5] = ["y", "yes", "true", "1", "x"];

/// Whether a cell signals sponsorship.
///
/// Exact matches on `y`, `yes`, `true`, `1`, `x` (case-insensitive, trimmed), plus
/// annotated answers such as `"yes - provisional"` or `"Yes*"`. A word that merely
/// starts with "yes" (`"yesterday"`) does not count.
pub fn is_truthy(cell: &CellValue) -> bool {
    let Some(text) = cell.as_text() else {
        return false;
    };
    let value = text.trim().to_lowercase();
    if TRUTHY_VALUES.contains(&value.as_str()) {
        return true;
    }
    match value.strip_prefix("yes") {
        Some(rest) => rest.chars().next().is_some_and(|c| !c.is_alphanumeric()),
        None => false,
    }
}

/// Flattens wide school rows into one record per sponsored (sport, gender)
pub struct RowNormalizer<'c> {
    keys: KeyColumns,
    categories: Vec<MatchedCategory<'c>>,
    data_year: u16,
}

impl<'c> RowNormalizer<'c> {
    pub fn new(keys: KeyColumns, categories: Vec<MatchedCategory<'c>>, data_year: u16) -> Self {
        Self {
            keys,
            categories,
            data_year,
        }
    }

    /// Records for a single row, in category order. Blank school names yield nothing.
    pub fn normalize_row(&self, row: &Row<'_>) -> Vec<SponsorshipRecord> {
        let school_name = row.get(&self.keys.school).trimmed();
        if school_name.is_empty() {
            return Vec::new();
        }

        let division = row.get(&self.keys.division).trimmed();
        let conference = self
            .keys
            .conference
            .as_deref()
            .map(|c| row.get(c).trimmed())
            .unwrap_or_default();

        self.categories
            .iter()
            .filter(|m| m.columns.iter().any(|c| is_truthy(row.get(c))))
            .map(|m| SponsorshipRecord {
                school_name: school_name.clone(),
                school_short_name: String::new(),
                division: division.clone(),
                conference: conference.clone(),
                sport: m.category.sport,
                gender: m.category.gender,
                data_year: self.data_year,
                source: SOURCE_LABEL.to_string(),
            })
            .collect()
    }

    /// Normalize every row and drop exact duplicates, keeping first occurrences
    pub fn normalize(&self, table: &SourceTable) -> Vec<SponsorshipRecord> {
        let mut skipped = 0usize;
        let mut records = Vec::new();

        for row in table.rows() {
            if row.get(&self.keys.school).trimmed().is_empty() {
                skipped += 1;
                continue;
            }
            records.extend(self.normalize_row(&row));
        }

        let emitted = records.len();
        let records = dedupe(records);

        debug!(skipped_blank_rows = skipped, "Skipped rows without a school name");
        info!(
            rows = table.len(),
            emitted,
            duplicates = emitted - records.len(),
            "Normalized sponsorship rows"
        );
        records
    }
}

/// Remove exact-duplicate records, preserving first-seen order
pub fn dedupe(records: Vec<SponsorshipRecord>) -> Vec<SponsorshipRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}
