//! Aggregation queries for the report pages: vote sums, allowed-vote sums,
//! per-level breakdowns and candidate/list rankings.
//!
//! Channel comparisons are ALWAYS case-insensitive (`LOWER(voting_type)`),
//! even though the importers persist the canonical capitalized form.

use crate::errors::AppResult;
use crate::models::channel::VotingChannel;
use rusqlite::types::ToSql;
use rusqlite::{Connection, params};
use serde::Serialize;

/// votes/allowed/percentage triple carried by every breakdown row.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownRow {
    pub id: i64,
    pub name: String,
    pub votes: i64,
    pub allowed: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitBreakdownRow {
    pub unit_id: i64,
    pub unit_number: String,
    pub unit_name: String,
    pub unit_address: String,
    pub votes: i64,
    pub allowed: i64,
    pub percentage: f64,
}

/// One ranking entry: a (number, name) group with its summed votes.
/// `list_name` is filled for candidate rankings only.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub number: String,
    pub name: String,
    pub list_name: Option<String>,
    pub total_votes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecialUnitRow {
    pub unit_id: i64,
    pub unit_number: String,
    pub unit_name: String,
    pub unit_address: String,
    pub voting_governorate: String,
    pub total_votes: i64,
}

/// votes/allowed × 100, rounded to 2 decimals.
/// A zero (or negative) denominator yields 0, never a division error.
pub fn percentage(votes: i64, allowed: i64) -> f64 {
    if allowed <= 0 {
        return 0.0;
    }
    ((votes as f64 / allowed as f64) * 100.0 * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Scope sums
// ---------------------------------------------------------------------------

pub fn governorate_votes_total(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<i64> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut sql = String::from(
        "SELECT COALESCE(SUM(number_of_votes), 0) FROM vote_records
         WHERE election_id = ?1 AND governorate_id = ?2
           AND LOWER(voting_type) = LOWER(?3)",
    );
    let mut binds: Vec<&dyn ToSql> = vec![&election_id, &governorate_id, &channel_s];
    if let Some(ref p) = party_s {
        sql.push_str(" AND list_number = ?4");
        binds.push(p);
    }

    let total = conn.query_row(&sql, &binds[..], |row| row.get(0))?;
    Ok(total)
}

pub fn governorate_allowed_total(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
) -> AppResult<i64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(total_allowed_votes), 0) FROM election_units
         WHERE election_id = ?1 AND governorate_id = ?2",
        params![election_id, governorate_id],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// District votes are reached through the unit join: a record counts for the
/// district its unit is currently attached to.
pub fn district_votes_total(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    district_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<i64> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut sql = String::from(
        "SELECT COALESCE(SUM(vr.number_of_votes), 0)
         FROM vote_records vr
         JOIN election_units u ON u.id = vr.election_unit_id
         WHERE vr.election_id = ?1 AND vr.governorate_id = ?2
           AND u.district_id = ?3 AND LOWER(vr.voting_type) = LOWER(?4)",
    );
    let mut binds: Vec<&dyn ToSql> =
        vec![&election_id, &governorate_id, &district_id, &channel_s];
    if let Some(ref p) = party_s {
        sql.push_str(" AND vr.list_number = ?5");
        binds.push(p);
    }

    let total = conn.query_row(&sql, &binds[..], |row| row.get(0))?;
    Ok(total)
}

pub fn district_allowed_total(conn: &Connection, district_id: i64) -> AppResult<i64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(total_allowed_votes), 0) FROM election_units
         WHERE district_id = ?1",
        [district_id],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn subdistrict_votes_total(
    conn: &Connection,
    subdistrict_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<i64> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut sql = String::from(
        "SELECT COALESCE(SUM(vr.number_of_votes), 0)
         FROM vote_records vr
         JOIN election_units u ON u.id = vr.election_unit_id
         WHERE u.subdistrict_id = ?1 AND LOWER(vr.voting_type) = LOWER(?2)",
    );
    let mut binds: Vec<&dyn ToSql> = vec![&subdistrict_id, &channel_s];
    if let Some(ref p) = party_s {
        sql.push_str(" AND vr.list_number = ?3");
        binds.push(p);
    }

    let total = conn.query_row(&sql, &binds[..], |row| row.get(0))?;
    Ok(total)
}

pub fn subdistrict_allowed_total(conn: &Connection, subdistrict_id: i64) -> AppResult<i64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(total_allowed_votes), 0) FROM election_units
         WHERE subdistrict_id = ?1",
        [subdistrict_id],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn unit_votes_total(
    conn: &Connection,
    unit_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<i64> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut sql = String::from(
        "SELECT COALESCE(SUM(number_of_votes), 0) FROM vote_records
         WHERE election_unit_id = ?1 AND LOWER(voting_type) = LOWER(?2)",
    );
    let mut binds: Vec<&dyn ToSql> = vec![&unit_id, &channel_s];
    if let Some(ref p) = party_s {
        sql.push_str(" AND list_number = ?3");
        binds.push(p);
    }

    let total = conn.query_row(&sql, &binds[..], |row| row.get(0))?;
    Ok(total)
}

// ---------------------------------------------------------------------------
// Unit breakdown (subdistrict scope)
// ---------------------------------------------------------------------------

/// Units of a subdistrict with their channel vote sums, ordered by unit
/// number. `search` matches unit number, name or address.
pub fn unit_breakdown_for_subdistrict(
    conn: &Connection,
    subdistrict_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
    search: Option<&str>,
) -> AppResult<Vec<UnitBreakdownRow>> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);
    let search_s = search.map(|q| q.trim().to_string());

    let mut vote_cond = String::from("LOWER(vr.voting_type) = LOWER(?2)");
    let mut sql_tail = String::new();
    let mut binds: Vec<&dyn ToSql> = vec![&subdistrict_id, &channel_s];

    let mut next = 3;
    if let Some(ref p) = party_s {
        vote_cond.push_str(&format!(" AND vr.list_number = ?{next}"));
        binds.push(p);
        next += 1;
    }
    if let Some(ref q) = search_s {
        sql_tail.push_str(&format!(
            " AND (u.unit_number LIKE '%' || ?{next} || '%'
                OR u.unit_name LIKE '%' || ?{next} || '%'
                OR u.unit_address LIKE '%' || ?{next} || '%')"
        ));
        binds.push(q);
    }

    let sql = format!(
        "SELECT u.id, u.unit_number, u.unit_name, u.unit_address,
                u.total_allowed_votes,
                COALESCE(SUM(CASE WHEN {vote_cond} THEN vr.number_of_votes END), 0) AS votes
         FROM election_units u
         LEFT JOIN vote_records vr ON vr.election_unit_id = u.id
         WHERE u.subdistrict_id = ?1{sql_tail}
         GROUP BY u.id
         ORDER BY u.unit_number ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&binds[..], |row| {
        let votes: i64 = row.get(5)?;
        let allowed: i64 = row.get(4)?;
        Ok(UnitBreakdownRow {
            unit_id: row.get(0)?,
            unit_number: row.get(1)?,
            unit_name: row.get(2)?,
            unit_address: row.get(3)?,
            votes,
            allowed,
            percentage: percentage(votes, allowed),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Group the votes of one unit by (list_number, list_name), summed and
/// sorted descending. SQL keeps ties in their arbitrary stable order.
pub fn unit_ranking_by_list(
    conn: &Connection,
    unit_id: i64,
    channel: VotingChannel,
) -> AppResult<Vec<RankingRow>> {
    let mut stmt = conn.prepare(
        "SELECT list_number, list_name, COALESCE(SUM(number_of_votes), 0) AS total
         FROM vote_records
         WHERE election_unit_id = ?1 AND LOWER(voting_type) = LOWER(?2)
         GROUP BY list_number, list_name
         ORDER BY total DESC",
    )?;
    let rows = stmt.query_map(params![unit_id, channel.to_db_str()], |row| {
        Ok(RankingRow {
            number: row.get(0)?,
            name: row.get(1)?,
            list_name: None,
            total_votes: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Group the votes of one unit by (candidate_number, candidate_name),
/// carrying the list name for display.
pub fn unit_ranking_by_candidate(
    conn: &Connection,
    unit_id: i64,
    channel: VotingChannel,
) -> AppResult<Vec<RankingRow>> {
    let mut stmt = conn.prepare(
        "SELECT candidate_number, candidate_name, list_name,
                COALESCE(SUM(number_of_votes), 0) AS total
         FROM vote_records
         WHERE election_unit_id = ?1 AND LOWER(voting_type) = LOWER(?2)
         GROUP BY candidate_number, candidate_name, list_name
         ORDER BY total DESC",
    )?;
    let rows = stmt.query_map(params![unit_id, channel.to_db_str()], |row| {
        Ok(RankingRow {
            number: row.get(0)?,
            name: row.get(1)?,
            list_name: row.get(2)?,
            total_votes: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn governorate_ranking_by_list(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<Vec<RankingRow>> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut cond = String::new();
    let mut binds: Vec<&dyn ToSql> = vec![&election_id, &governorate_id, &channel_s];
    if let Some(ref p) = party_s {
        cond.push_str(" AND list_number = ?4");
        binds.push(p);
    }

    let sql = format!(
        "SELECT list_number, list_name, COALESCE(SUM(number_of_votes), 0) AS total
         FROM vote_records
         WHERE election_id = ?1 AND governorate_id = ?2
           AND LOWER(voting_type) = LOWER(?3){cond}
         GROUP BY list_number, list_name
         ORDER BY total DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&binds[..], |row| {
        Ok(RankingRow {
            number: row.get(0)?,
            name: row.get(1)?,
            list_name: None,
            total_votes: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn governorate_ranking_by_candidate(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    channel: VotingChannel,
    party: Option<&str>,
) -> AppResult<Vec<RankingRow>> {
    let channel_s = channel.to_db_str();
    let party_s = party.map(str::to_string);

    let mut cond = String::new();
    let mut binds: Vec<&dyn ToSql> = vec![&election_id, &governorate_id, &channel_s];
    if let Some(ref p) = party_s {
        cond.push_str(" AND list_number = ?4");
        binds.push(p);
    }

    let sql = format!(
        "SELECT candidate_number, candidate_name, list_name,
                COALESCE(SUM(number_of_votes), 0) AS total
         FROM vote_records
         WHERE election_id = ?1 AND governorate_id = ?2
           AND LOWER(voting_type) = LOWER(?3){cond}
         GROUP BY candidate_number, candidate_name, list_name
         ORDER BY total DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&binds[..], |row| {
        Ok(RankingRow {
            number: row.get(0)?,
            name: row.get(1)?,
            list_name: row.get(2)?,
            total_votes: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Special channel
// ---------------------------------------------------------------------------

/// Special votes aggregated per unit for a governorate, heaviest first.
/// Starts from vote_records (a special unit may lie outside the imported
/// geography). `search` matches unit number or name.
pub fn special_units(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    search: Option<&str>,
) -> AppResult<Vec<SpecialUnitRow>> {
    let search_s = search.map(|q| q.trim().to_string());

    let mut cond = String::new();
    let mut binds: Vec<&dyn ToSql> = vec![&election_id, &governorate_id];
    if let Some(ref q) = search_s {
        cond.push_str(
            " AND (u.unit_number LIKE '%' || ?3 || '%'
                OR u.unit_name LIKE '%' || ?3 || '%')",
        );
        binds.push(q);
    }

    let sql = format!(
        "SELECT u.id, u.unit_number, u.unit_name, u.unit_address,
                vr.voting_governorate,
                COALESCE(SUM(vr.number_of_votes), 0) AS total
         FROM vote_records vr
         JOIN election_units u ON u.id = vr.election_unit_id
         WHERE vr.election_id = ?1 AND vr.governorate_id = ?2
           AND LOWER(vr.voting_type) = 'special'{cond}
         GROUP BY u.id, vr.voting_governorate
         ORDER BY total DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&binds[..], |row| {
        Ok(SpecialUnitRow {
            unit_id: row.get(0)?,
            unit_number: row.get(1)?,
            unit_name: row.get(2)?,
            unit_address: row.get(3)?,
            voting_governorate: row.get(4)?,
            total_votes: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Candidate ranking of one unit's Special votes.
pub fn special_unit_ranking(
    conn: &Connection,
    election_id: i64,
    unit_id: i64,
) -> AppResult<Vec<RankingRow>> {
    let mut stmt = conn.prepare(
        "SELECT candidate_number, candidate_name, list_name,
                COALESCE(SUM(number_of_votes), 0) AS total
         FROM vote_records
         WHERE election_id = ?1 AND election_unit_id = ?2
           AND LOWER(voting_type) = 'special'
         GROUP BY candidate_number, candidate_name, list_number, list_name
         ORDER BY total DESC",
    )?;
    let rows = stmt.query_map(params![election_id, unit_id], |row| {
        Ok(RankingRow {
            number: row.get(0)?,
            name: row.get(1)?,
            list_name: row.get(2)?,
            total_votes: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
