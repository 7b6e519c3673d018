use crate::db::log::{record_geo_upload, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::import::decode::GeoRowDecoder;
use crate::import::{GEO_REQUIRED_COLUMNS, Sheet};
use crate::models::summary::GeoImportSummary;
use crate::utils::path::file_name;
use std::path::Path;

/// Geography Resolver: reconcile one uploaded geography file against the
/// stored hierarchy of a governorate.
///
/// The whole file is processed inside one all-or-nothing transaction; any
/// error past the header validation rolls everything back. Re-running the
/// same file is idempotent: units are found-or-created by (election,
/// unit_number) and their attributes are overwritten with the row's values
/// every time: last write wins, never merge.
pub struct GeoImportLogic;

impl GeoImportLogic {
    pub fn apply(
        pool: &mut DbPool,
        election_id: i64,
        governorate: &str,
        file: &str,
    ) -> AppResult<GeoImportSummary> {
        let election = queries::find_election(&pool.conn, election_id)?
            .ok_or_else(|| AppError::NotFound(format!("election {election_id}")))?;
        let gov = queries::find_governorate_by_name(&pool.conn, election.id, governorate)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "governorate '{}' in election {}",
                    governorate, election.id
                ))
            })?;

        // Read + validate columns BEFORE the transaction opens: a broken
        // file must not leave a half-open write.
        let sheet = Sheet::open(Path::new(file))?;
        let missing = sheet.missing_columns(GEO_REQUIRED_COLUMNS);
        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing.join(", ")));
        }
        let decoder = GeoRowDecoder::new(&sheet)?;

        let mut summary = GeoImportSummary::default();

        let tx = pool.conn.transaction()?;

        for row in &sheet.rows {
            // Rows without a usable unit number are skipped, not failed.
            let Some(geo) = decoder.decode(row) else {
                summary.skipped_rows += 1;
                continue;
            };

            let (district_id, d_created) =
                queries::find_or_create_district(&tx, gov.id, &geo.district)?;
            let (subdistrict_id, s_created) =
                queries::find_or_create_subdistrict(&tx, district_id, &geo.subdistrict)?;

            if d_created {
                summary.created_districts += 1;
            }
            if s_created {
                summary.created_subdistricts += 1;
            }

            let (_, created) = queries::upsert_unit_geo(
                &tx,
                election.id,
                gov.id,
                district_id,
                subdistrict_id,
                &geo.unit_number,
                &geo.unit_name,
                &geo.unit_address,
                geo.stations_count,
                geo.allowed_votes,
            )?;

            if created {
                summary.created_units += 1;
            } else {
                summary.updated_units += 1;
            }
        }

        let filename = file_name(file);
        record_geo_upload(&tx, election.id, gov.id, &filename, &summary)?;
        ttlog(
            &tx,
            "import-geo",
            &filename,
            &format!(
                "Districts +{}, Subdistricts +{}, Units +{} (updated {}). Skipped rows: {}",
                summary.created_districts,
                summary.created_subdistricts,
                summary.created_units,
                summary.updated_units,
                summary.skipped_rows
            ),
        )?;

        tx.commit()?;
        Ok(summary)
    }
}
