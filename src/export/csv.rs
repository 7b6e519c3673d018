use crate::errors::AppResult;
use crate::export::model::{RankingExport, get_headers, ranking_to_row};
use crate::export::notify_export_success;
use csv::Writer;
use std::path::Path;

/// Write the ranking rows as CSV.
pub(crate) fn export_csv(rows: &[RankingExport], path: &Path) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| std::io::Error::other(e.to_string()))?;

    wtr.write_record(get_headers())
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    for r in rows {
        wtr.write_record(ranking_to_row(r))
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    wtr.flush()?;
    notify_export_success("CSV", path);
    Ok(())
}
