use crate::db::queries;
use crate::db::stats::{self, RankingRow};
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::unit::ElectionUnit;
use rusqlite::Connection;
use serde::Serialize;

/// Unit detail: total votes plus the two rankings (per list and per
/// candidate), summed and sorted heaviest first.
#[derive(Debug, Serialize)]
pub struct UnitDetail {
    pub unit: ElectionUnit,
    pub total_votes: i64,
    pub per_list: Vec<RankingRow>,
    pub top_candidates: Vec<RankingRow>,
}

impl UnitDetail {
    pub fn build(
        conn: &Connection,
        election_id: i64,
        unit_number: &str,
        channel: VotingChannel,
        party: Option<&str>,
    ) -> AppResult<Self> {
        let unit = queries::find_unit_by_number(conn, election_id, unit_number)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "election unit '{}' in election {}",
                    unit_number, election_id
                ))
            })?;

        let total_votes = stats::unit_votes_total(conn, unit.id, channel, party)?;
        let per_list = stats::unit_ranking_by_list(conn, unit.id, channel)?;
        let top_candidates = stats::unit_ranking_by_candidate(conn, unit.id, channel)?;

        Ok(Self {
            unit,
            total_votes,
            per_list,
            top_candidates,
        })
    }
}
