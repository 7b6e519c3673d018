//! Typed row decoders: raw sheet cells → fixed record structs.
//!
//! Coercion rules (matching the upload semantics):
//! - unit numbers: float-tolerant parse to a canonical decimal-integer
//!   string ("123.0" and "123" resolve to the same unit); failure means the
//!   row is skipped, never an error;
//! - counts: int-via-float parse, 0 on failure;
//! - text: trimmed, empty when the cell is blank.

use crate::errors::{AppError, AppResult};
use crate::import::sheet::Sheet;
use crate::import::{GEO_REQUIRED_COLUMNS, VOTE_REQUIRED_COLUMNS};
use crate::models::geography::UNKNOWN_NAME;

/// Canonical decimal-integer unit number, or None when the cell is absent
/// or unparseable (the row is then skipped and counted).
pub fn canonical_unit_number(raw: Option<&str>) -> Option<String> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    let f: f64 = s.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    Some(format!("{}", f as i64))
}

/// Int-via-float coercion, 0 on any parse failure.
pub fn int_or_zero(raw: Option<&str>) -> i64 {
    match raw {
        Some(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        None => 0,
    }
}

/// Like [`int_or_zero`] but clamped to ≥ 0 (allowed-votes denominators).
pub fn nonneg_int_or_zero(raw: Option<&str>) -> i64 {
    int_or_zero(raw).max(0)
}

/// Trimmed cell text, empty string for blank cells.
pub fn trimmed(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or("").to_string()
}

fn cell<'a>(row: &'a [Option<String>], idx: usize) -> Option<&'a str> {
    row.get(idx).and_then(|c| c.as_deref())
}

// ---------------------------------------------------------------------------
// Geography rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GeoRow {
    pub district: String,
    pub subdistrict: String,
    pub unit_number: String,
    pub unit_name: String,
    pub unit_address: String,
    pub stations_count: i64,
    pub allowed_votes: i64,
}

pub struct GeoRowDecoder {
    district: usize,
    subdistrict: usize,
    unit_number: usize,
    unit_name: usize,
    unit_address: usize,
    allowed_votes: usize,
    stations_count: Option<usize>,
}

impl GeoRowDecoder {
    /// Build the column map. The sheet must already have passed the
    /// required-column validation; a hole here is reported the same way.
    pub fn new(sheet: &Sheet) -> AppResult<Self> {
        let missing = sheet.missing_columns(GEO_REQUIRED_COLUMNS);
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing.join(", ")));
        }

        let idx = |name: &str| {
            sheet
                .column_index(name)
                .ok_or_else(|| AppError::MissingColumns(name.to_string()))
        };

        Ok(Self {
            district: idx("District")?,
            subdistrict: idx("Subdistrict")?,
            unit_number: idx("Election Unit Number")?,
            unit_name: idx("Election Unit Name")?,
            unit_address: idx("Election Unit Address")?,
            allowed_votes: idx("Total Allowed Votes")?,
            stations_count: sheet.column_index("Stations Count"),
        })
    }

    /// Decode one row; None means "skip this row" (unit number absent or
    /// unparseable).
    pub fn decode(&self, row: &[Option<String>]) -> Option<GeoRow> {
        let unit_number = canonical_unit_number(cell(row, self.unit_number))?;

        let district = match trimmed(cell(row, self.district)) {
            s if s.is_empty() => UNKNOWN_NAME.to_string(),
            s => s,
        };
        let subdistrict = match trimmed(cell(row, self.subdistrict)) {
            s if s.is_empty() => UNKNOWN_NAME.to_string(),
            s => s,
        };

        Some(GeoRow {
            district,
            subdistrict,
            unit_number,
            unit_name: trimmed(cell(row, self.unit_name)),
            unit_address: trimmed(cell(row, self.unit_address)),
            stations_count: self
                .stations_count
                .map(|i| nonneg_int_or_zero(cell(row, i)))
                .unwrap_or(0),
            allowed_votes: nonneg_int_or_zero(cell(row, self.allowed_votes)),
        })
    }
}

// ---------------------------------------------------------------------------
// Vote rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct VoteRow {
    pub unit_number: String,
    pub candidate_number: String,
    pub candidate_name: String,
    pub list_name: String,
    pub list_number: String,
    pub gender: String,
    pub voting_governorate: String,
    pub station_number: String,
    /// Used only when a Special row has to auto-create its unit.
    pub unit_name: String,
    pub unit_address: String,
    pub number_of_votes: i64,
}

pub struct VoteRowDecoder {
    unit_number: usize,
    number_of_votes: usize,
    candidate_number: usize,
    candidate_name: usize,
    list_name: usize,
    list_number: usize,
    gender: Option<usize>,
    voting_governorate: Option<usize>,
    station_number: Option<usize>,
    unit_name: Option<usize>,
    unit_address: Option<usize>,
}

impl VoteRowDecoder {
    pub fn new(sheet: &Sheet) -> AppResult<Self> {
        let missing = sheet.missing_columns(VOTE_REQUIRED_COLUMNS);
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing.join(", ")));
        }

        let idx = |name: &str| {
            sheet
                .column_index(name)
                .ok_or_else(|| AppError::MissingColumns(name.to_string()))
        };

        Ok(Self {
            unit_number: idx("Election Unit Number")?,
            number_of_votes: idx("Number of Votes")?,
            candidate_number: idx("Candidate number")?,
            candidate_name: idx("Candidate name")?,
            list_name: idx("List Name")?,
            list_number: idx("List Number")?,
            gender: sheet.column_index("Gender"),
            voting_governorate: sheet.column_index("Voting Governorate"),
            station_number: sheet.column_index("Station Number"),
            unit_name: sheet.column_index("Election Unit Name"),
            unit_address: sheet.column_index("Election Unit Address"),
        })
    }

    /// Decode one row; None means "skip this row".
    pub fn decode(&self, row: &[Option<String>]) -> Option<VoteRow> {
        let unit_number = canonical_unit_number(cell(row, self.unit_number))?;

        let opt = |i: Option<usize>| i.map(|i| trimmed(cell(row, i))).unwrap_or_default();

        Some(VoteRow {
            unit_number,
            candidate_number: trimmed(cell(row, self.candidate_number)),
            candidate_name: trimmed(cell(row, self.candidate_name)),
            list_name: trimmed(cell(row, self.list_name)),
            list_number: trimmed(cell(row, self.list_number)),
            gender: opt(self.gender),
            voting_governorate: opt(self.voting_governorate),
            station_number: opt(self.station_number),
            unit_name: opt(self.unit_name),
            unit_address: opt(self.unit_address),
            number_of_votes: int_or_zero(cell(row, self.number_of_votes)),
        })
    }
}
