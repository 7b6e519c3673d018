use crate::db::queries;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::election::Election;
use rusqlite::Connection;
use serde::Serialize;

/// Election overview: per-governorate totals on both channels.
#[derive(Debug, Serialize)]
pub struct GovernorateTotals {
    pub governorate_id: i64,
    pub governorate: String,
    pub public_total: i64,
    pub special_total: i64,
    pub total_votes: i64,
}

#[derive(Debug, Serialize)]
pub struct ElectionOverview {
    pub election: Election,
    pub rows: Vec<GovernorateTotals>,
}

impl ElectionOverview {
    pub fn build(conn: &Connection, election_id: i64) -> AppResult<Self> {
        let election = queries::find_election(conn, election_id)?
            .ok_or_else(|| AppError::NotFound(format!("election {election_id}")))?;

        let mut rows = Vec::new();
        for gov in queries::governorates_for_election(conn, election.id)? {
            let public_total = stats::governorate_votes_total(
                conn,
                election.id,
                gov.id,
                VotingChannel::Public,
                None,
            )?;
            let special_total = stats::governorate_votes_total(
                conn,
                election.id,
                gov.id,
                VotingChannel::Special,
                None,
            )?;

            rows.push(GovernorateTotals {
                governorate_id: gov.id,
                governorate: gov.name,
                public_total,
                special_total,
                total_votes: public_total + special_total,
            });
        }

        Ok(Self { election, rows })
    }
}
