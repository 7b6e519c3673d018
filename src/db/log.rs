use crate::errors::AppResult;
use crate::models::summary::{GeoImportSummary, VoteImportSummary};
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Append the audit record of one geography upload. Write-once: upload_log
/// rows are never updated or deleted (short of the election going away).
pub fn record_geo_upload(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    filename: &str,
    summary: &GeoImportSummary,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO upload_log
             (election_id, governorate_id, kind, filename,
              inserted_count, updated_count, skipped_count, uploaded_at)
         VALUES (?1, ?2, 'geo', ?3, ?4, ?5, ?6, ?7)",
        params![
            election_id,
            governorate_id,
            filename,
            summary.created_units,
            summary.updated_units,
            summary.skipped_rows,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Append the audit record of one vote upload.
pub fn record_vote_upload(
    conn: &Connection,
    election_id: i64,
    governorate_id: i64,
    filename: &str,
    summary: &VoteImportSummary,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO upload_log
             (election_id, governorate_id, kind, filename,
              inserted_count, updated_count, skipped_count, uploaded_at)
         VALUES (?1, ?2, 'votes', ?3, ?4, 0, ?5, ?6)",
        params![
            election_id,
            governorate_id,
            filename,
            summary.inserted,
            summary.skipped,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
