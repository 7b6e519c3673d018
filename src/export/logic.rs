// src/export/logic.rs

use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::export::csv::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::model::RankingExport;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportBy, ExportFormat};
use crate::models::channel::VotingChannel;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

/// High-level logic for the `export` command: dump a governorate ranking
/// (by list or by candidate) to csv/json/xlsx.
pub struct ExportLogic;

impl ExportLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        election_id: i64,
        governorate: &str,
        channel: VotingChannel,
        by: ExportBy,
        party: Option<&str>,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        let gov = resolve_governorate(&pool.conn, election_id, governorate)?;

        let ranking = match by {
            ExportBy::List => stats::governorate_ranking_by_list(
                &pool.conn,
                election_id,
                gov,
                channel,
                party,
            )?,
            ExportBy::Candidate => stats::governorate_ranking_by_candidate(
                &pool.conn,
                election_id,
                gov,
                channel,
                party,
            )?,
        };

        let rows = RankingExport::from_ranking(&ranking);

        if rows.is_empty() {
            warning("No vote records found for the selected scope.");
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        Ok(())
    }
}

fn resolve_governorate(conn: &Connection, election_id: i64, governorate: &str) -> AppResult<i64> {
    crate::db::queries::find_governorate_by_name(conn, election_id, governorate)?
        .map(|g| g.id)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "governorate '{}' in election {}",
                governorate, election_id
            ))
        })
}
