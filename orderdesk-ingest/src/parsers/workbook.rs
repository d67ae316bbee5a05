//! Excel / OpenDocument reader backed by calamine.

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDateTime, NaiveTime};
use orderdesk_core::{Cell, OrderDeskError, Result, Table};
use std::path::Path;
use tracing::debug;

/// `2024-01-15` for whole days, `2024-01-15 09:30:00` otherwise.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Durations and out-of-range serials keep the raw serial.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) if dt.is_datetime() => Cell::Text(format_datetime(d)),
            _ => Cell::Text(value.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Read the first worksheet. Its first row is the header; trailing rows that
/// are entirely empty are dropped.
pub fn read_first_sheet(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| OrderDeskError::file_load(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OrderDeskError::file_load(path, "workbook has no worksheets"))?
        .map_err(|e| OrderDeskError::file_load(path, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| to_cell(c).as_text()).collect(),
        None => return Ok(Table::default()),
    };

    let mut body: Vec<Vec<Cell>> = rows
        .map(|r| r.iter().map(to_cell).collect::<Vec<_>>())
        .collect();
    while body.last().is_some_and(|r| r.iter().all(Cell::is_blank)) {
        body.pop();
    }

    debug!(path = %path.display(), rows = body.len(), "read worksheet");
    Ok(Table::new(headers, body))
}
