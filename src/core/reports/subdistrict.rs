use crate::db::queries;
use crate::db::stats::{self, UnitBreakdownRow};
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::geography::SubDistrict;
use rusqlite::Connection;
use serde::Serialize;

/// Subdistrict broken down by election unit, with an optional substring
/// search on unit number/name/address.
#[derive(Debug, Serialize)]
pub struct UnitBreakdown {
    pub subdistrict: SubDistrict,
    pub rows: Vec<UnitBreakdownRow>,
    pub total_votes: i64,
    pub total_allowed_votes: i64,
    pub overall_percentage: f64,
}

impl UnitBreakdown {
    pub fn build(
        conn: &Connection,
        subdistrict_id: i64,
        channel: VotingChannel,
        party: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Self> {
        let subdistrict = queries::find_subdistrict(conn, subdistrict_id)?
            .ok_or_else(|| AppError::NotFound(format!("subdistrict {subdistrict_id}")))?;

        let rows =
            stats::unit_breakdown_for_subdistrict(conn, subdistrict.id, channel, party, search)?;

        let total_votes = rows.iter().map(|r| r.votes).sum();
        let total_allowed_votes = rows.iter().map(|r| r.allowed).sum();

        Ok(Self {
            subdistrict,
            rows,
            total_votes,
            total_allowed_votes,
            overall_percentage: stats::percentage(total_votes, total_allowed_votes),
        })
    }
}
