use crate::db::queries;
use crate::db::stats::{self, RankingRow, SpecialUnitRow};
use crate::errors::{AppError, AppResult};
use crate::models::geography::Governorate;
use crate::models::unit::ElectionUnit;
use rusqlite::Connection;
use serde::Serialize;

/// Special-channel report: per-unit totals for a governorate, heaviest
/// first. Special units may lie outside the imported geography.
#[derive(Debug, Serialize)]
pub struct SpecialUnits {
    pub governorate: Governorate,
    pub rows: Vec<SpecialUnitRow>,
    pub total_votes: i64,
}

impl SpecialUnits {
    pub fn build(
        conn: &Connection,
        election_id: i64,
        governorate: &str,
        search: Option<&str>,
    ) -> AppResult<Self> {
        let gov = queries::find_governorate_by_name(conn, election_id, governorate)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "governorate '{}' in election {}",
                    governorate, election_id
                ))
            })?;

        let rows = stats::special_units(conn, election_id, gov.id, search)?;
        let total_votes = rows.iter().map(|r| r.total_votes).sum();

        Ok(Self {
            governorate: gov,
            rows,
            total_votes,
        })
    }
}

/// Candidate breakdown of one unit's Special votes.
#[derive(Debug, Serialize)]
pub struct SpecialUnitDetail {
    pub unit: ElectionUnit,
    pub rows: Vec<RankingRow>,
    pub total_votes: i64,
}

impl SpecialUnitDetail {
    pub fn build(conn: &Connection, election_id: i64, unit_number: &str) -> AppResult<Self> {
        let unit = queries::find_unit_by_number(conn, election_id, unit_number)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "election unit '{}' in election {}",
                    unit_number, election_id
                ))
            })?;

        let rows = stats::special_unit_ranking(conn, election_id, unit.id)?;
        let total_votes = rows.iter().map(|r| r.total_votes).sum();

        Ok(Self {
            unit,
            rows,
            total_votes,
        })
    }
}
