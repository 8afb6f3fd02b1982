use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::app::ports::RecordSinkPort;
use crate::constants::OUTPUT_HEADER;
use crate::error::Result;
use crate::types::SponsorshipRecord;

/// Writes sponsorship records as a comma-delimited table with a fixed header.
/// The file is staged next to the destination and renamed into place once complete.
pub struct CsvOutputAdapter {
    path: PathBuf,
}

impl CsvOutputAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl RecordSinkPort for CsvOutputAdapter {
    fn write_records(&self, records: &[SponsorshipRecord]) -> Result<()> {
        let dir = self.target_dir();
        fs::create_dir_all(dir)?;

        let staged = NamedTempFile::new_in(dir)?;
        debug!(staged = %staged.path().display(), "Staging output");

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(staged.as_file());
            writer.write_record(OUTPUT_HEADER)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        // Temp files are created owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        staged.persist(&self.path).map_err(|e| e.error)?;
        info!(
            path = %self.path.display(),
            records = records.len(),
            "Wrote sponsorship table"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
