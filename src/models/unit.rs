use serde::Serialize;

/// A physical voting/reporting unit, the join key between geography and
/// vote data. Unique per (election, unit_number); the unit number is always
/// stored as a canonical decimal-integer string.
///
/// district_id/subdistrict_id are nulled when the parent is deleted; the
/// unit survives but loses its geographic attribution.
#[derive(Debug, Clone, Serialize)]
pub struct ElectionUnit {
    pub id: i64,
    pub election_id: i64,
    pub governorate_id: i64,
    pub district_id: Option<i64>,
    pub subdistrict_id: Option<i64>,
    pub unit_number: String,
    pub unit_name: String,
    pub unit_address: String,
    pub stations_count: i64,
    /// Denominator for turnout percentage reporting.
    pub total_allowed_votes: i64,
}
