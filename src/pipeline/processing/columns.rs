use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

/// Ordered, case-insensitive regex patterns. Earlier patterns take priority.
#[derive(Debug, Clone)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compile a list of patterns. Panics on an invalid pattern, so only use
    /// this with literals that are exercised by tests.
    pub fn new(patterns: &[&str]) -> Self {
        Self::try_new(patterns).unwrap_or_else(|e| panic!("invalid column pattern: {}", e))
    }

    pub fn try_new(patterns: &[&str]) -> std::result::Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True when any pattern finds a match anywhere in `text`
    pub fn matches_any(&self, text: &str) -> bool {
        let normalized = normalize_header(text);
        self.patterns.iter().any(|re| re.is_match(&normalized))
    }

    /// First column matched under the highest-priority pattern that matches anything
    pub fn resolve<'a>(&self, columns: &'a [String]) -> Option<&'a str> {
        let normalized: Vec<String> = columns.iter().map(|c| normalize_header(c)).collect();
        self.patterns.iter().find_map(|re| {
            normalized
                .iter()
                .position(|c| re.is_match(c))
                .map(|i| columns[i].as_str())
        })
    }

    /// Human-readable pattern list for diagnostics
    pub fn describe(&self) -> String {
        self.patterns
            .iter()
            .map(|re| format!("/{}/", re.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

pub static SCHOOL_PATTERNS: Lazy<PatternList> =
    Lazy::new(|| PatternList::new(&[r"^school$", r"^institution", r"school name"]));
pub static DIVISION_PATTERNS: Lazy<PatternList> = Lazy::new(|| PatternList::new(&[r"division"]));
pub static CONFERENCE_PATTERNS: Lazy<PatternList> = Lazy::new(|| PatternList::new(&[r"conference"]));

/// The key columns every row is read through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumns {
    pub school: String,
    pub division: String,
    /// Optional; rows get an empty conference when absent
    pub conference: Option<String>,
}

impl KeyColumns {
    /// Resolve school, division and conference. School and division are required.
    pub fn resolve(columns: &[String]) -> Result<Self> {
        let school = required(columns, "School", &SCHOOL_PATTERNS)?;
        let division = required(columns, "Division", &DIVISION_PATTERNS)?;
        let conference = CONFERENCE_PATTERNS.resolve(columns).map(str::to_string);

        match &conference {
            Some(c) => debug!(column = %c, "Resolved conference column"),
            None => warn!("No conference column found; conference will be empty for all rows"),
        }

        Ok(Self {
            school,
            division,
            conference,
        })
    }
}

fn required(columns: &[String], role: &'static str, patterns: &PatternList) -> Result<String> {
    match patterns.resolve(columns) {
        Some(column) => {
            debug!(role, column, "Resolved key column");
            Ok(column.to_string())
        }
        None => Err(ExtractError::MissingColumn {
            role,
            patterns: patterns.describe(),
        }),
    }
}
