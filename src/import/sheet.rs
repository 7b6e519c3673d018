use crate::errors::{AppError, AppResult};
use calamine::{DataType, Reader, Xlsx, open_workbook};
use std::path::Path;

/// One uploaded tabular file, normalized: a trimmed header row plus data
/// rows of optional string cells (None = empty cell).
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    /// Open a spreadsheet by extension: `.xlsx`/`.xlsm` via calamine,
    /// `.csv` via the csv crate. Read failures surface as SheetRead before
    /// any database work starts.
    pub fn open(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xlsm" => Self::from_xlsx(path),
            "csv" => Self::from_csv(path),
            other => Err(AppError::SheetRead(format!(
                "unsupported file extension '{}' (expected .xlsx or .csv)",
                other
            ))),
        }
    }

    fn from_xlsx(path: &Path) -> AppResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| AppError::SheetRead(format!("{}: {}", path.display(), e)))?;

        // Single-sheet exports are the norm; always take the first worksheet.
        let worksheets = workbook.worksheets();
        let (_, range) = worksheets
            .first()
            .ok_or_else(|| AppError::SheetRead(format!("{}: workbook is empty", path.display())))?;

        let mut iter = range.rows();
        let header_row = iter
            .next()
            .ok_or_else(|| AppError::SheetRead(format!("{}: missing header row", path.display())))?;

        let headers = header_row
            .iter()
            .map(|c| cell_to_string(c).unwrap_or_default())
            .collect();

        let rows = iter
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    fn from_csv(path: &Path) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| AppError::SheetRead(format!("{}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| AppError::SheetRead(format!("{}: {}", path.display(), e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::SheetRead(format!("{}: {}", path.display(), e)))?;
            rows.push(
                record
                    .iter()
                    .map(|cell| {
                        let cell = cell.trim();
                        if cell.is_empty() {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    /// Required column names absent from the header, in the required order.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| !self.headers.iter().any(|h| h == *c))
            .map(|c| (*c).to_string())
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Excel cell → trimmed string. Whole floats print without the trailing
/// `.0` so that numeric unit-number columns round-trip as written.
fn cell_to_string(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        DataType::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
