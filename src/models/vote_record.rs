use serde::Serialize;

/// One imported vote row. No uniqueness constraint: multiple rows per
/// (unit, candidate) are summed at query time, not merged at write time.
#[derive(Debug, Clone, Serialize)]
pub struct VoteRecord {
    pub id: i64,
    pub election_id: i64,
    pub governorate_id: i64,
    pub election_unit_id: i64,
    pub candidate_number: String,
    pub candidate_name: String,
    pub list_name: String,
    pub list_number: String,
    pub gender: String,
    /// Canonical capitalized channel tag ("Public"/"Special").
    pub voting_type: String,
    pub voting_governorate: String,
    pub station_number: String,
    pub number_of_votes: i64,
    pub created_at: String,
}
