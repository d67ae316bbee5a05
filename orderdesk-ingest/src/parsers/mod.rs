//! File-format readers producing a [`Table`].

pub mod csv_table;
pub mod workbook;

use orderdesk_core::{OrderDeskError, Result, Table};
use std::path::Path;

/// Spreadsheet extensions the workbook reader accepts.
pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Lower-cased extension of `path`, if any.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Read a CSV or spreadsheet file into a table, choosing the reader by extension.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(OrderDeskError::file_load(path, "file not found"));
    }

    match extension(path).as_deref() {
        Some("csv") => csv_table::read_csv_table(path),
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext) => workbook::read_first_sheet(path),
        Some(ext) => Err(OrderDeskError::file_load(
            path,
            format!("unsupported file type .{ext}"),
        )),
        None => Err(OrderDeskError::file_load(path, "file has no extension")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("orders.txt");
        std::fs::write(&p, "a,b\n").unwrap();
        let err = read_table(&p).unwrap_err();
        assert!(err.to_string().contains("unsupported file type .txt"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_table("does/not/exist.xlsx").unwrap_err();
        assert!(matches!(err, OrderDeskError::FileLoad { .. }));
    }
}
