use crate::db::queries;
use crate::db::stats::{self, BreakdownRow};
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::geography::District;
use rusqlite::Connection;
use serde::Serialize;

/// District broken down by subdistrict.
#[derive(Debug, Serialize)]
pub struct SubdistrictBreakdown {
    pub district: District,
    pub rows: Vec<BreakdownRow>,
    pub total_votes: i64,
    pub total_allowed_votes: i64,
    pub overall_percentage: f64,
}

impl SubdistrictBreakdown {
    pub fn build(
        conn: &Connection,
        district_id: i64,
        channel: VotingChannel,
        party: Option<&str>,
    ) -> AppResult<Self> {
        let district = queries::find_district(conn, district_id)?
            .ok_or_else(|| AppError::NotFound(format!("district {district_id}")))?;

        let mut rows = Vec::new();
        let mut total_votes = 0;
        let mut total_allowed_votes = 0;

        for sub in queries::subdistricts_for_district(conn, district.id)? {
            let votes = stats::subdistrict_votes_total(conn, sub.id, channel, party)?;
            let allowed = stats::subdistrict_allowed_total(conn, sub.id)?;

            total_votes += votes;
            total_allowed_votes += allowed;

            rows.push(BreakdownRow {
                id: sub.id,
                name: sub.name,
                votes,
                allowed,
                percentage: stats::percentage(votes, allowed),
            });
        }

        Ok(Self {
            district,
            rows,
            total_votes,
            total_allowed_votes,
            overall_percentage: stats::percentage(total_votes, total_allowed_votes),
        })
    }
}
