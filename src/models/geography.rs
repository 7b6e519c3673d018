//! Administrative geography rows: governorate → district → subdistrict.
//! Districts and subdistricts are created lazily during geography import,
//! with the literal placeholder "Unknown" when the source cell is blank.

use serde::Serialize;

/// Placeholder name for blank district/subdistrict cells.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct Governorate {
    pub id: i64,
    pub election_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct District {
    pub id: i64,
    pub governorate_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubDistrict {
    pub id: i64,
    pub district_id: i64,
    pub name: String,
}
