use crate::db::log::{record_vote_upload, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::import::decode::VoteRowDecoder;
use crate::import::{Sheet, VOTE_REQUIRED_COLUMNS};
use crate::models::channel::VotingChannel;
use crate::models::summary::VoteImportSummary;
use crate::models::vote_record::VoteRecord;
use crate::utils::path::file_name;
use chrono::Local;
use std::path::Path;

/// Vote Importer: load one vote file for a (election, governorate, channel)
/// scope with full-refresh semantics: every prior record of that channel is
/// removed before the new rows are inserted, all inside one transaction.
///
/// Channel rules differ on unresolved unit numbers:
/// - Special rows may reference units outside the imported geography; the
///   unit is auto-created with minimal fields;
/// - Public rows must resolve against existing geography or are skipped.
pub struct VoteImportLogic;

impl VoteImportLogic {
    pub fn apply(
        pool: &mut DbPool,
        election_id: i64,
        governorate: &str,
        channel: VotingChannel,
        file: &str,
    ) -> AppResult<VoteImportSummary> {
        let election = queries::find_election(&pool.conn, election_id)?
            .ok_or_else(|| AppError::NotFound(format!("election {election_id}")))?;
        let gov = queries::find_governorate_by_name(&pool.conn, election.id, governorate)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "governorate '{}' in election {}",
                    governorate, election.id
                ))
            })?;

        let sheet = Sheet::open(Path::new(file))?;
        let missing = sheet.missing_columns(VOTE_REQUIRED_COLUMNS);
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing.join(", ")));
        }
        let decoder = VoteRowDecoder::new(&sheet)?;

        let mut summary = VoteImportSummary::default();
        let created_at = Local::now().to_rfc3339();

        let tx = pool.conn.transaction()?;

        // Full refresh: this upload replaces the channel's prior data for
        // the governorate. The other channel is untouched.
        summary.replaced =
            queries::delete_votes_for_channel(&tx, election.id, gov.id, channel)? as u32;

        for row in &sheet.rows {
            let Some(vote) = decoder.decode(row) else {
                summary.skipped += 1;
                continue;
            };

            let unit_id =
                match queries::find_unit_id_by_number(&tx, election.id, &vote.unit_number)? {
                    Some(id) => id,
                    None if channel.is_special() => queries::create_minimal_unit(
                        &tx,
                        election.id,
                        gov.id,
                        &vote.unit_number,
                        &vote.unit_name,
                        &vote.unit_address,
                    )?,
                    None => {
                        summary.skipped += 1;
                        continue;
                    }
                };

            queries::insert_vote_record(
                &tx,
                &VoteRecord {
                    id: 0,
                    election_id: election.id,
                    governorate_id: gov.id,
                    election_unit_id: unit_id,
                    candidate_number: vote.candidate_number,
                    candidate_name: vote.candidate_name,
                    list_name: vote.list_name,
                    list_number: vote.list_number,
                    gender: vote.gender,
                    voting_type: channel.to_db_str().to_string(),
                    voting_governorate: vote.voting_governorate,
                    station_number: vote.station_number,
                    number_of_votes: vote.number_of_votes,
                    created_at: created_at.clone(),
                },
            )?;
            summary.inserted += 1;
        }

        let filename = file_name(file);
        record_vote_upload(&tx, election.id, gov.id, &filename, &summary)?;
        ttlog(
            &tx,
            "import-votes",
            &filename,
            &format!(
                "{} votes imported: {} rows (replaced {}). Skipped: {}",
                channel.to_db_str(),
                summary.inserted,
                summary.replaced,
                summary.skipped
            ),
        )?;

        tx.commit()?;
        Ok(summary)
    }
}
