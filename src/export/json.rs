use crate::errors::{AppError, AppResult};
use crate::export::model::RankingExport;
use crate::export::notify_export_success;
use std::path::Path;

/// Write the ranking rows as pretty-printed JSON.
pub(crate) fn export_json(rows: &[RankingExport], path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json)?;
    notify_export_success("JSON", path);
    Ok(())
}
