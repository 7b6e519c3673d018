use crate::models::election_status::ElectionStatus;
use crate::models::election_type::ElectionType;
use chrono::NaiveDate;
use serde::Serialize;

/// One election. At most one election may exist per (date, type);
/// deletion is blocked once the status is FINISHED.
#[derive(Debug, Clone, Serialize)]
pub struct Election {
    pub id: i64,
    pub name: String,
    pub election_type: ElectionType,
    pub status: ElectionStatus,
    pub election_date: NaiveDate,
    pub created_at: String,
}
