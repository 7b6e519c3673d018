//! Spreadsheet ingestion: file readers and typed row decoders.
//!
//! Uploaded files are normalized to one in-memory [`sheet::Sheet`] shape
//! (header row + string cells) regardless of format, then decoded row by row
//! into fixed record structs with named coercion rules. The importers in
//! `core` only ever see validated structs, never raw cells.

pub mod decode;
pub mod sheet;

pub use sheet::Sheet;

/// Required columns of a geography file. Exact header strings; an upload
/// missing any of them is rejected wholesale before any row is processed.
pub const GEO_REQUIRED_COLUMNS: &[&str] = &[
    "Governorate",
    "District",
    "Subdistrict",
    "Election Unit Number",
    "Election Unit Name",
    "Election Unit Address",
    "Total Allowed Votes",
];

/// Required columns of a vote file.
pub const VOTE_REQUIRED_COLUMNS: &[&str] = &[
    "Election Unit Number",
    "Number of Votes",
    "Candidate number",
    "Candidate name",
    "List Name",
    "List Number",
];
