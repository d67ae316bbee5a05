//! Write the order template and the processed order file as xlsx workbooks.

use chrono::NaiveDateTime;
use orderdesk_core::{CanonicalOrderRow, Cell, OrderDeskError, Result, INPUT_COLUMNS, OUTPUT_COLUMNS};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::debug;

pub const TEMPLATE_SHEET: &str = "Template";
pub const PROCESSED_SHEET: &str = "Processed Data";
pub const TEMPLATE_FILE_NAME: &str = "excel_template.xlsx";
pub const DEFAULT_OUTPUT_PREFIX: &str = "Buy";

/// `<prefix>_<YYYYMMDDHHMM>`, the suggested output name without extension.
pub fn default_output_stem(prefix: &str, now: NaiveDateTime) -> String {
    format!("{}_{}", prefix, now.format("%Y%m%d%H%M"))
}

/// Append `.xlsx` unless the name already carries it.
pub fn output_file_name(stem: &str) -> String {
    if stem.to_ascii_lowercase().ends_with(".xlsx") {
        stem.to_string()
    } else {
        format!("{stem}.xlsx")
    }
}

fn write_sheet(
    path: &Path,
    sheet_name: &str,
    headers: &[&str],
    rows: impl Iterator<Item = Vec<Cell>>,
) -> std::result::Result<usize, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, name) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    let mut written = 0;
    for (i, cells) in rows.enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(row, col, *b)?;
                }
            }
        }
        written += 1;
    }

    workbook.save(path)?;
    Ok(written)
}

/// Write an empty workbook holding only the nine upload columns.
pub fn write_template(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_sheet(path, TEMPLATE_SHEET, &INPUT_COLUMNS, std::iter::empty())
        .map_err(|e| OrderDeskError::export(path, e))?;
    debug!(path = %path.display(), "wrote order template");
    Ok(())
}

/// Write processed orders under the canonical 13-column header.
pub fn write_orders(path: impl AsRef<Path>, rows: &[CanonicalOrderRow]) -> Result<usize> {
    let path = path.as_ref();
    let written = write_sheet(
        path,
        PROCESSED_SHEET,
        &OUTPUT_COLUMNS,
        rows.iter().map(|r| r.to_cells().to_vec()),
    )
    .map_err(|e| OrderDeskError::export(path, e))?;
    debug!(path = %path.display(), rows = written, "wrote processed orders");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::workbook::read_first_sheet;
    use calamine::{open_workbook_auto, Reader};
    use chrono::NaiveDate;

    #[test]
    fn test_default_output_stem() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 59)
            .unwrap();
        assert_eq!(default_output_stem("Buy", now), "Buy_202403070905");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("Buy_1"), "Buy_1.xlsx");
        assert_eq!(output_file_name("orders.XLSX"), "orders.XLSX");
    }

    #[test]
    fn test_template_has_only_input_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join(TEMPLATE_FILE_NAME);
        write_template(&p).unwrap();

        let wb = open_workbook_auto(&p).unwrap();
        assert_eq!(wb.sheet_names(), vec![TEMPLATE_SHEET.to_string()]);

        let t = read_first_sheet(&p).unwrap();
        assert_eq!(t.headers, INPUT_COLUMNS);
        assert!(t.is_empty());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("no_such_dir").join("out.xlsx");
        assert!(matches!(write_orders(&p, &[]), Err(OrderDeskError::Export { .. })));
    }
}
