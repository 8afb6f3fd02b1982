use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Cannot find {}. Place the NCAA XLSX there or update input_path in config.toml.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Could not detect a {role} column (tried patterns: {patterns}). Adjust the column patterns.")]
    MissingColumn { role: &'static str, patterns: String },

    #[error("Workbook {} has no sheets", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("Workbook read failed: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::InputNotFound { .. } => 2,
            ExtractError::MissingColumn { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_fatal_inputs() {
        let missing = ExtractError::InputNotFound {
            path: PathBuf::from("data/x.xlsx"),
        };
        let column = ExtractError::MissingColumn {
            role: "division",
            patterns: "division".to_string(),
        };
        let other = ExtractError::Config("bad".to_string());

        assert_eq!(missing.exit_code(), 2);
        assert_eq!(column.exit_code(), 3);
        assert_eq!(other.exit_code(), 1);
    }

    #[test]
    fn test_missing_input_message_names_the_path() {
        let err = ExtractError::InputNotFound {
            path: PathBuf::from("data/x.xlsx"),
        };
        let message = err.to_string();
        assert!(message.contains("data/x.xlsx"));
        assert!(message.contains("config.toml"));
    }
}
