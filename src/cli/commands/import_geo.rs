use crate::cli::parser::Commands;
use crate::core::geo_import::GeoImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Import a geography spreadsheet for one governorate.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::ImportGeo {
        election,
        governorate,
        file,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let summary = GeoImportLogic::apply(&mut pool, *election, governorate, file)?;

        success(format!(
            "GEO imported successfully. Districts +{}, Subdistricts +{}, Units +{} (updated {}). Skipped rows: {}.",
            summary.created_districts,
            summary.created_subdistricts,
            summary.created_units,
            summary.updated_units,
            summary.skipped_rows
        ));
    }

    Ok(())
}
