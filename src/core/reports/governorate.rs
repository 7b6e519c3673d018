use crate::db::queries;
use crate::db::stats::{self, BreakdownRow};
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::geography::Governorate;
use rusqlite::Connection;
use serde::Serialize;

/// Governorate summary: channel totals, allowed-votes denominator and the
/// Public turnout percentage.
#[derive(Debug, Serialize)]
pub struct GovernorateSummary {
    pub governorate: Governorate,
    pub public_total: i64,
    pub special_total: i64,
    pub total_votes: i64,
    pub total_allowed_votes: i64,
    pub public_percentage: f64,
}

impl GovernorateSummary {
    pub fn build(
        conn: &Connection,
        election_id: i64,
        governorate: &str,
        party: Option<&str>,
    ) -> AppResult<Self> {
        let gov = resolve_governorate(conn, election_id, governorate)?;

        let public_total =
            stats::governorate_votes_total(conn, election_id, gov.id, VotingChannel::Public, party)?;
        let special_total = stats::governorate_votes_total(
            conn,
            election_id,
            gov.id,
            VotingChannel::Special,
            party,
        )?;
        let total_allowed_votes = stats::governorate_allowed_total(conn, election_id, gov.id)?;

        Ok(Self {
            governorate: gov,
            public_total,
            special_total,
            total_votes: public_total + special_total,
            total_allowed_votes,
            public_percentage: stats::percentage(public_total, total_allowed_votes),
        })
    }
}

/// Governorate broken down by district: one votes/allowed/percentage triple
/// per district plus the overall totals across all of them.
#[derive(Debug, Serialize)]
pub struct DistrictBreakdown {
    pub governorate: Governorate,
    pub rows: Vec<BreakdownRow>,
    pub total_votes: i64,
    pub total_allowed_votes: i64,
    pub overall_percentage: f64,
}

impl DistrictBreakdown {
    pub fn build(
        conn: &Connection,
        election_id: i64,
        governorate: &str,
        channel: VotingChannel,
        party: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Self> {
        let gov = resolve_governorate(conn, election_id, governorate)?;

        let mut rows = Vec::new();
        let mut total_votes = 0;
        let mut total_allowed_votes = 0;

        for district in queries::districts_for_governorate(conn, gov.id, search)? {
            let votes = stats::district_votes_total(
                conn,
                election_id,
                gov.id,
                district.id,
                channel,
                party,
            )?;
            let allowed = stats::district_allowed_total(conn, district.id)?;

            total_votes += votes;
            total_allowed_votes += allowed;

            rows.push(BreakdownRow {
                id: district.id,
                name: district.name,
                votes,
                allowed,
                percentage: stats::percentage(votes, allowed),
            });
        }

        Ok(Self {
            governorate: gov,
            rows,
            total_votes,
            total_allowed_votes,
            overall_percentage: stats::percentage(total_votes, total_allowed_votes),
        })
    }
}

fn resolve_governorate(
    conn: &Connection,
    election_id: i64,
    governorate: &str,
) -> AppResult<Governorate> {
    queries::find_governorate_by_name(conn, election_id, governorate)?.ok_or_else(|| {
        AppError::NotFound(format!(
            "governorate '{}' in election {}",
            governorate, election_id
        ))
    })
}
