//! CSV reader. The reference masters ship as CSV exports.

use orderdesk_core::{Cell, OrderDeskError, Result, Table};
use std::path::Path;

/// Interpret a raw CSV field: blank is empty, numeric-looking text is a number,
/// everything else is kept verbatim (no trimming).
pub fn infer_cell(field: &str) -> Cell {
    let t = field.trim();
    if t.is_empty() {
        return Cell::Empty;
    }
    let numeric_chars = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if numeric_chars && t.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(n) = t.parse::<f64>() {
            return Cell::Number(n);
        }
    }
    Cell::Text(field.to_string())
}

/// Parse a CSV file whose first record is the header.
pub fn read_csv_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| OrderDeskError::file_load(path, e))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| OrderDeskError::file_load(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| OrderDeskError::file_load(path, e))?;
        let row: Vec<Cell> = record.iter().map(infer_cell).collect();
        // Skip fully blank lines
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_cell() {
        assert_eq!(infer_cell(""), Cell::Empty);
        assert_eq!(infer_cell("  "), Cell::Empty);
        assert_eq!(infer_cell("100"), Cell::Number(100.0));
        assert_eq!(infer_cell("-50.5"), Cell::Number(-50.5));
        assert_eq!(infer_cell(" growth fund "), Cell::text(" growth fund "));
        assert_eq!(infer_cell("inf"), Cell::text("inf"));
        assert_eq!(infer_cell("1-2"), Cell::text("1-2"));
    }

    #[test]
    fn test_read_csv_table() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("Broker_Master.csv");
        std::fs::write(&p, "\u{feff}Code, Shortname\nabc,ABCBRK\n,\n42,FORTYTWO,extra\n").unwrap();

        let t = read_csv_table(&p).unwrap();
        assert_eq!(t.headers, vec!["Code", "Shortname"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(0, 1), &Cell::text("ABCBRK"));
        assert_eq!(t.cell(1, 0), &Cell::Number(42.0));
    }
}
