use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::election::Election;
use crate::models::election_status::ElectionStatus;
use crate::models::election_type::ElectionType;
use crate::utils::date;
use chrono::{Local, NaiveDate};

/// High-level business logic for the `election` command.
pub struct ElectionLogic;

fn parse_type(s: &str) -> AppResult<ElectionType> {
    ElectionType::parse(s).ok_or_else(|| AppError::InvalidElectionType(s.to_string()))
}

fn parse_status(s: &str) -> AppResult<ElectionStatus> {
    ElectionStatus::parse(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

fn parse_election_date(s: &str) -> AppResult<NaiveDate> {
    let d = date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    if d > date::today() {
        return Err(AppError::Validation(
            "Election date cannot be in the future.".to_string(),
        ));
    }
    Ok(d)
}

/// At most one election may exist per (date, type). `exclude` skips the
/// election being updated.
fn check_date_type_unique(
    pool: &DbPool,
    election_date: &NaiveDate,
    election_type: ElectionType,
    exclude: Option<i64>,
) -> AppResult<()> {
    if let Some(existing) =
        queries::find_election_id_by_date_type(&pool.conn, election_date, election_type)?
        && Some(existing) != exclude
    {
        return Err(AppError::Validation(format!(
            "An election of type {} already exists on {}.",
            election_type.to_db_str(),
            election_date.format("%Y-%m-%d")
        )));
    }
    Ok(())
}

impl ElectionLogic {
    /// Create an election and seed its default governorate list.
    pub fn create(
        pool: &mut DbPool,
        name: &str,
        type_str: &str,
        status_str: Option<&str>,
        date_str: &str,
    ) -> AppResult<Election> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Election name is required.".to_string()));
        }

        let election_type = parse_type(type_str)?;
        let status = match status_str {
            Some(s) => parse_status(s)?,
            None => ElectionStatus::Active,
        };
        let election_date = parse_election_date(date_str)?;

        check_date_type_unique(pool, &election_date, election_type, None)?;

        let created_at = Local::now().to_rfc3339();

        let tx = pool.conn.transaction()?;
        let id = queries::insert_election(
            &tx,
            name,
            election_type,
            status,
            &election_date,
            &created_at,
        )?;
        queries::seed_governorates(&tx, id, election_type)?;
        ttlog(
            &tx,
            "election-create",
            name,
            &format!(
                "Created {} election on {}",
                election_type.to_db_str(),
                election_date.format("%Y-%m-%d")
            ),
        )?;
        tx.commit()?;

        Ok(Election {
            id,
            name: name.to_string(),
            election_type,
            status,
            election_date,
            created_at,
        })
    }

    /// Update name/type/status/date of an existing election. Omitted flags
    /// leave the current value untouched; validation matches create.
    pub fn update(
        pool: &mut DbPool,
        id: i64,
        name: Option<&str>,
        type_str: Option<&str>,
        status_str: Option<&str>,
        date_str: Option<&str>,
    ) -> AppResult<Election> {
        let mut election = queries::find_election(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("election {id}")))?;

        if let Some(n) = name {
            let n = n.trim();
            if n.is_empty() {
                return Err(AppError::Validation("Election name is required.".to_string()));
            }
            election.name = n.to_string();
        }
        if let Some(t) = type_str {
            election.election_type = parse_type(t)?;
        }
        if let Some(s) = status_str {
            election.status = parse_status(s)?;
        }
        if let Some(d) = date_str {
            election.election_date = parse_election_date(d)?;
        }

        check_date_type_unique(
            pool,
            &election.election_date,
            election.election_type,
            Some(election.id),
        )?;

        queries::update_election(&pool.conn, &election)?;
        ttlog(
            &pool.conn,
            "election-update",
            &election.name,
            "Election updated",
        )?;

        Ok(election)
    }

    /// Delete an election and everything under it (CASCADE).
    /// Blocked once the election is FINISHED.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Election> {
        let election = queries::find_election(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("election {id}")))?;

        if election.status.is_finished() {
            return Err(AppError::Validation(
                "Cannot delete a finished election.".to_string(),
            ));
        }

        queries::delete_election(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "election-delete",
            &election.name,
            "Election deleted with all governorates, units and vote records",
        )?;

        Ok(election)
    }
}
