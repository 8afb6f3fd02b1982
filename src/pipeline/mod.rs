// Sponsorship extraction pipeline: load -> resolve -> match -> normalize -> write

pub mod processing;

use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::app::ports::{RecordSinkPort, TableSourcePort};
use crate::config::Config;
use crate::constants::UNKNOWN_DIVISION;
use crate::error::Result;
use crate::infra::{CsvOutputAdapter, WorkbookInputAdapter};
use crate::types::{SourceTable, SponsorshipRecord};
use processing::categories::{match_categories, CATEGORIES};
use processing::columns::KeyColumns;
use processing::normalize::RowNormalizer;

/// Result of a complete pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    pub input_file: String,
    pub output_file: String,
    pub total_rows: usize,
    pub records_written: usize,
    pub division_counts: BTreeMap<String, usize>,
}

/// Extract deduplicated sponsorship records from an in-memory table.
///
/// Fails only when the school or division column cannot be found.
pub fn extract(table: &SourceTable, data_year: u16) -> Result<Vec<SponsorshipRecord>> {
    let keys = KeyColumns::resolve(table.columns())?;
    let categories = match_categories(table.columns(), &CATEGORIES);
    info!(
        school = %keys.school,
        division = %keys.division,
        categories = categories.len(),
        "Resolved spreadsheet layout"
    );

    Ok(RowNormalizer::new(keys, categories, data_year).normalize(table))
}

/// Record counts per division, blank divisions bucketed as "Unknown"
pub fn division_counts(records: &[SponsorshipRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        let division = if record.division.is_empty() {
            UNKNOWN_DIVISION
        } else {
            record.division.as_str()
        };
        *counts.entry(division.to_string()).or_insert(0) += 1;
    }
    counts
}

pub struct Pipeline;

impl Pipeline {
    /// Run against the configured input workbook and output table
    pub fn run(config: &Config) -> Result<PipelineResult> {
        let source = WorkbookInputAdapter::new(&config.input_path);
        let sink = CsvOutputAdapter::new(&config.output_path);
        Self::run_with(&source, &sink, config.data_year)
    }

    /// Run with explicit ports. Nothing is written unless extraction succeeds.
    #[instrument(skip_all, fields(input = %source.describe(), data_year = data_year))]
    pub fn run_with(
        source: &dyn TableSourcePort,
        sink: &dyn RecordSinkPort,
        data_year: u16,
    ) -> Result<PipelineResult> {
        let table = source.load()?;
        let records = extract(&table, data_year)?;
        sink.write_records(&records)?;

        let division_counts = division_counts(&records);
        for (division, count) in &division_counts {
            info!(division = %division, count, "Division breakdown");
        }

        Ok(PipelineResult {
            input_file: source.describe(),
            output_file: sink.describe(),
            total_rows: table.len(),
            records_written: records.len(),
            division_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::types::CellValue;
    use std::cell::RefCell;

    struct MemorySource(SourceTable);

    impl TableSourcePort for MemorySource {
        fn load(&self) -> Result<SourceTable> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    #[derive(Default)]
    struct MemorySink {
        written: RefCell<Option<Vec<SponsorshipRecord>>>,
    }

    impl RecordSinkPort for MemorySink {
        fn write_records(&self, records: &[SponsorshipRecord]) -> Result<()> {
            *self.written.borrow_mut() = Some(records.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "memory-out".to_string()
        }
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| CellValue::from(*c)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_run_with_writes_records_and_counts_divisions() {
        let source = MemorySource(table(
            &["School", "Division", "Conference", "Men's Indoor Track", "Women's Indoor Track"],
            &[
                &["Acme State", "II", "Mid-Atlantic", "Y", "Y"],
                &["Beta U", "I", "Big Sky", "", "yes"],
                &["Gamma", "", "", "x", ""],
            ],
        ));
        let sink = MemorySink::default();

        let result = Pipeline::run_with(&source, &sink, 2025).unwrap();
        assert_eq!(result.total_rows, 3);
        assert_eq!(result.records_written, 4);
        assert_eq!(result.output_file, "memory-out");
        assert_eq!(result.division_counts.get("II"), Some(&2));
        assert_eq!(result.division_counts.get("I"), Some(&1));
        assert_eq!(result.division_counts.get("Unknown"), Some(&1));
        assert_eq!(sink.written.borrow().as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_missing_division_aborts_before_writing() {
        let source = MemorySource(table(
            &["School", "Conference", "Men's Indoor Track"],
            &[&["Acme State", "Mid-Atlantic", "Y"]],
        ));
        let sink = MemorySink::default();

        let err = Pipeline::run_with(&source, &sink, 2025).unwrap_err();
        assert!(matches!(err, ExtractError::MissingColumn { .. }));
        assert!(sink.written.borrow().is_none());
    }

    #[test]
    fn test_all_blank_schools_still_write_empty_table() {
        let source = MemorySource(table(
            &["School", "Division", "Men's Cross Country"],
            &[&["", "I", "Y"], &["  ", "II", "Y"]],
        ));
        let sink = MemorySink::default();

        let result = Pipeline::run_with(&source, &sink, 2025).unwrap();
        assert_eq!(result.records_written, 0);
        assert!(result.division_counts.is_empty());
        assert_eq!(sink.written.borrow().as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let t = table(
            &["Institution", "NCAA Division", "Cross Country Men", "Cross Country Women"],
            &[&["Delta", "III", "1", "true"], &["Delta", "III", "1", "true"]],
        );
        let first = extract(&t, 2024).unwrap();
        let second = extract(&t, 2024).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|r| r.data_year == 2024));
    }
}
