use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a database up to the current schema.
///
/// There is deliberately no CREATE TABLE here: the whole result-entry
/// schema (elections down to vote_records and the upload audit) is owned by
/// the migration engine, so `init` and `db --migrate` go through the same
/// path.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}
