use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::models::election::Election;
use crate::models::election_status::ElectionStatus;
use crate::models::election_type::ElectionType;
use crate::models::geography::{District, Governorate, SubDistrict};
use crate::models::unit::ElectionUnit;
use crate::models::vote_record::VoteRecord;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

pub fn map_election_row(row: &Row) -> Result<Election> {
    let date_str: String = row.get("election_date")?;
    let election_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let type_str: String = row.get("election_type")?;
    let election_type = ElectionType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidElectionType(type_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = ElectionStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Election {
        id: row.get("id")?,
        name: row.get("name")?,
        election_type,
        status,
        election_date,
        created_at: row.get("created_at")?,
    })
}

fn map_governorate_row(row: &Row) -> Result<Governorate> {
    Ok(Governorate {
        id: row.get("id")?,
        election_id: row.get("election_id")?,
        name: row.get("name")?,
    })
}

fn map_district_row(row: &Row) -> Result<District> {
    Ok(District {
        id: row.get("id")?,
        governorate_id: row.get("governorate_id")?,
        name: row.get("name")?,
    })
}

fn map_subdistrict_row(row: &Row) -> Result<SubDistrict> {
    Ok(SubDistrict {
        id: row.get("id")?,
        district_id: row.get("district_id")?,
        name: row.get("name")?,
    })
}

fn map_unit_row(row: &Row) -> Result<ElectionUnit> {
    Ok(ElectionUnit {
        id: row.get("id")?,
        election_id: row.get("election_id")?,
        governorate_id: row.get("governorate_id")?,
        district_id: row.get("district_id")?,
        subdistrict_id: row.get("subdistrict_id")?,
        unit_number: row.get("unit_number")?,
        unit_name: row.get("unit_name")?,
        unit_address: row.get("unit_address")?,
        stations_count: row.get("stations_count")?,
        total_allowed_votes: row.get("total_allowed_votes")?,
    })
}

// ---------------------------------------------------------------------------
// Elections
// ---------------------------------------------------------------------------

pub fn insert_election(
    conn: &Connection,
    name: &str,
    election_type: ElectionType,
    status: ElectionStatus,
    election_date: &NaiveDate,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO elections (name, election_type, status, election_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            election_type.to_db_str(),
            status.to_db_str(),
            election_date.format("%Y-%m-%d").to_string(),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_election(conn: &Connection, id: i64) -> AppResult<Option<Election>> {
    let mut stmt = conn.prepare("SELECT * FROM elections WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_election_row).optional()?)
}

/// Lookup used by the (date, type) uniqueness validation.
pub fn find_election_id_by_date_type(
    conn: &Connection,
    election_date: &NaiveDate,
    election_type: ElectionType,
) -> AppResult<Option<i64>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM elections WHERE election_date = ?1 AND election_type = ?2",
    )?;
    Ok(stmt
        .query_row(
            params![
                election_date.format("%Y-%m-%d").to_string(),
                election_type.to_db_str()
            ],
            |row| row.get(0),
        )
        .optional()?)
}

pub fn list_elections(conn: &Connection) -> AppResult<Vec<Election>> {
    let mut stmt = conn.prepare("SELECT * FROM elections ORDER BY id DESC")?;
    let rows = stmt.query_map([], map_election_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_election(conn: &Connection, e: &Election) -> AppResult<()> {
    conn.execute(
        "UPDATE elections
         SET name = ?1, election_type = ?2, status = ?3, election_date = ?4
         WHERE id = ?5",
        params![
            e.name,
            e.election_type.to_db_str(),
            e.status.to_db_str(),
            e.election_date.format("%Y-%m-%d").to_string(),
            e.id,
        ],
    )?;
    Ok(())
}

/// Children (governorates, units, vote records, uploads) fall via CASCADE.
pub fn delete_election(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM elections WHERE id = ?1", [id])?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Governorates
// ---------------------------------------------------------------------------

/// Seed the fixed default governorate list for a fresh election.
/// INSERT OR IGNORE keeps the call idempotent under the (election, name)
/// uniqueness.
pub fn seed_governorates(
    conn: &Connection,
    election_id: i64,
    election_type: ElectionType,
) -> AppResult<()> {
    for name in election_type.default_governorates() {
        conn.execute(
            "INSERT OR IGNORE INTO governorates (election_id, name) VALUES (?1, ?2)",
            params![election_id, name],
        )?;
    }
    Ok(())
}

pub fn governorates_for_election(
    conn: &Connection,
    election_id: i64,
) -> AppResult<Vec<Governorate>> {
    let mut stmt =
        conn.prepare("SELECT * FROM governorates WHERE election_id = ?1 ORDER BY name ASC")?;
    let rows = stmt.query_map([election_id], map_governorate_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_governorate_by_name(
    conn: &Connection,
    election_id: i64,
    name: &str,
) -> AppResult<Option<Governorate>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM governorates
         WHERE election_id = ?1 AND name = ?2 COLLATE NOCASE",
    )?;
    Ok(stmt
        .query_row(params![election_id, name.trim()], map_governorate_row)
        .optional()?)
}

// ---------------------------------------------------------------------------
// Districts / subdistricts (lazy creation during geography import)
// ---------------------------------------------------------------------------

/// Find-or-create a district under a governorate.
/// Returns (id, created).
pub fn find_or_create_district(
    conn: &Connection,
    governorate_id: i64,
    name: &str,
) -> AppResult<(i64, bool)> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM districts WHERE governorate_id = ?1 AND name = ?2",
            params![governorate_id, name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok((id, false));
    }

    conn.execute(
        "INSERT INTO districts (governorate_id, name) VALUES (?1, ?2)",
        params![governorate_id, name],
    )?;
    Ok((conn.last_insert_rowid(), true))
}

/// Find-or-create a subdistrict under a district.
/// Returns (id, created).
pub fn find_or_create_subdistrict(
    conn: &Connection,
    district_id: i64,
    name: &str,
) -> AppResult<(i64, bool)> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM subdistricts WHERE district_id = ?1 AND name = ?2",
            params![district_id, name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok((id, false));
    }

    conn.execute(
        "INSERT INTO subdistricts (district_id, name) VALUES (?1, ?2)",
        params![district_id, name],
    )?;
    Ok((conn.last_insert_rowid(), true))
}

pub fn find_district(conn: &Connection, id: i64) -> AppResult<Option<District>> {
    let mut stmt = conn.prepare("SELECT * FROM districts WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_district_row).optional()?)
}

pub fn find_subdistrict(conn: &Connection, id: i64) -> AppResult<Option<SubDistrict>> {
    let mut stmt = conn.prepare("SELECT * FROM subdistricts WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_subdistrict_row).optional()?)
}

pub fn districts_for_governorate(
    conn: &Connection,
    governorate_id: i64,
    search: Option<&str>,
) -> AppResult<Vec<District>> {
    let mut out = Vec::new();

    match search {
        Some(q) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM districts
                 WHERE governorate_id = ?1 AND name LIKE '%' || ?2 || '%'
                 ORDER BY name ASC",
            )?;
            let rows = stmt.query_map(params![governorate_id, q.trim()], map_district_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM districts WHERE governorate_id = ?1 ORDER BY name ASC",
            )?;
            let rows = stmt.query_map([governorate_id], map_district_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn subdistricts_for_district(
    conn: &Connection,
    district_id: i64,
) -> AppResult<Vec<SubDistrict>> {
    let mut stmt =
        conn.prepare("SELECT * FROM subdistricts WHERE district_id = ?1 ORDER BY name ASC")?;
    let rows = stmt.query_map([district_id], map_subdistrict_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Election units
// ---------------------------------------------------------------------------

pub fn find_unit_id_by_number(
    conn: &Connection,
    election_id: i64,
    unit_number: &str,
) -> AppResult<Option<i64>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM election_units WHERE election_id = ?1 AND unit_number = ?2",
    )?;
    Ok(stmt
        .query_row(params![election_id, unit_number], |row| row.get(0))
        .optional()?)
}

pub fn find_unit_by_number(
    conn: &Connection,
    election_id: i64,
    unit_number: &str,
) -> AppResult<Option<ElectionUnit>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM election_units WHERE election_id = ?1 AND unit_number = ?2",
    )?;
    Ok(stmt
        .query_row(params![election_id, unit_number], map_unit_row)
        .optional()?)
}

/// Geography-import upsert: find-or-create by (election, unit_number) and
/// overwrite linkage, name, address and allowed votes with the row's values
/// on EVERY call: last write wins, never merge.
/// Returns (id, created).
#[allow(clippy::too_many_arguments)]
pub fn upsert_unit_geo(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    district_id: i64,
    subdistrict_id: i64,
    unit_number: &str,
    unit_name: &str,
    unit_address: &str,
    stations_count: i64,
    total_allowed_votes: i64,
) -> AppResult<(i64, bool)> {
    if let Some(id) = find_unit_id_by_number(conn, election_id, unit_number)? {
        conn.execute(
            "UPDATE election_units
             SET governorate_id = ?1, district_id = ?2, subdistrict_id = ?3,
                 unit_name = ?4, unit_address = ?5, stations_count = ?6,
                 total_allowed_votes = ?7
             WHERE id = ?8",
            params![
                governorate_id,
                district_id,
                subdistrict_id,
                unit_name,
                unit_address,
                stations_count,
                total_allowed_votes,
                id,
            ],
        )?;
        return Ok((id, false));
    }

    conn.execute(
        "INSERT INTO election_units
             (election_id, governorate_id, district_id, subdistrict_id,
              unit_number, unit_name, unit_address, stations_count, total_allowed_votes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            election_id,
            governorate_id,
            district_id,
            subdistrict_id,
            unit_number,
            unit_name,
            unit_address,
            stations_count,
            total_allowed_votes,
        ],
    )?;
    Ok((conn.last_insert_rowid(), true))
}

/// Special-channel auto-creation: minimal fields, no geography links,
/// no allowed votes.
pub fn create_minimal_unit(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    unit_number: &str,
    unit_name: &str,
    unit_address: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO election_units
             (election_id, governorate_id, unit_number, unit_name, unit_address)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![election_id, governorate_id, unit_number, unit_name, unit_address],
    )?;
    Ok(conn.last_insert_rowid())
}

// ---------------------------------------------------------------------------
// Vote records
// ---------------------------------------------------------------------------

/// Full-refresh precondition of the vote import: remove every prior record
/// for (election, governorate, channel) before inserting the new file.
pub fn delete_votes_for_channel(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    channel: VotingChannel,
) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM vote_records
         WHERE election_id = ?1 AND governorate_id = ?2
           AND LOWER(voting_type) = LOWER(?3)",
        params![election_id, governorate_id, channel.to_db_str()],
    )?;
    Ok(n)
}

pub fn insert_vote_record(conn: &Connection, vr: &VoteRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO vote_records
             (election_id, governorate_id, election_unit_id,
              candidate_number, candidate_name, list_name, list_number,
              gender, voting_type, voting_governorate, station_number,
              number_of_votes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            vr.election_id,
            vr.governorate_id,
            vr.election_unit_id,
            vr.candidate_number,
            vr.candidate_name,
            vr.list_name,
            vr.list_number,
            vr.gender,
            vr.voting_type,
            vr.voting_governorate,
            vr.station_number,
            vr.number_of_votes,
            vr.created_at,
        ],
    )?;
    Ok(())
}
