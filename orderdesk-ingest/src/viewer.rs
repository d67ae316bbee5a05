//! Source-folder browsing for the spreadsheet viewer.

use orderdesk_core::{OrderDeskError, Result, Table};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::parsers::{extension, workbook::read_first_sheet};

/// Extensions the viewer lists.
pub const VIEWABLE_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

/// Names of the `.xls` / `.xlsx` files directly inside `dir`, sorted.
pub fn list_spreadsheets(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| OrderDeskError::file_load(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OrderDeskError::file_load(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let viewable = extension(&path).is_some_and(|e| VIEWABLE_EXTENSIONS.contains(&e.as_str()));
        if viewable {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    debug!(dir = %dir.display(), files = names.len(), "listed spreadsheets");
    Ok(names)
}

/// Load `name` from `dir` verbatim (first worksheet).
pub fn load_spreadsheet(dir: impl AsRef<Path>, name: &str) -> Result<Table> {
    let path = dir.as_ref().join(name);
    if !path.is_file() {
        return Err(OrderDeskError::file_load(&path, "file not found"));
    }
    read_first_sheet(&path)
}
