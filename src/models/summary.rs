//! Upload summaries returned by the importers and recorded in upload_log.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GeoImportSummary {
    pub created_districts: u32,
    pub created_subdistricts: u32,
    pub created_units: u32,
    pub updated_units: u32,
    pub skipped_rows: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VoteImportSummary {
    pub inserted: u32,
    pub skipped: u32,
    /// Rows removed by the full-refresh delete before inserting.
    pub replaced: u32,
}
