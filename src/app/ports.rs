use crate::error::Result;
use crate::types::{SourceTable, SponsorshipRecord};

/// Read side of the table boundary
pub trait TableSourcePort {
    fn load(&self) -> Result<SourceTable>;

    /// Where the table comes from, for log lines
    fn describe(&self) -> String;
}

/// Write side of the table boundary
pub trait RecordSinkPort {
    /// Persist the full record set. An empty slice still produces a header-only table.
    fn write_records(&self, records: &[SponsorshipRecord]) -> Result<()>;

    fn describe(&self) -> String;
}
