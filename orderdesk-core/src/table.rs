//! In-memory tabular data as read from a spreadsheet or CSV file.

use serde::Serialize;
use std::fmt;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form used for case-folding and lookups.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            // Whole numbers print without a trailing ".0" (shares, codes).
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Header row plus data rows. Rows may be shorter than the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, trimming surrounding whitespace from header names.
    pub fn new<S: AsRef<str>>(headers: impl IntoIterator<Item = S>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.as_ref().trim().to_string()).collect(),
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Names from `required` that are not present in the header, in order.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect()
    }

    /// Cell at (row, col); positions past the end of a short row read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(100.0).to_string(), "100");
        assert_eq!(Cell::Number(50.5).to_string(), "50.5");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Bool(true).to_string(), "TRUE");
        assert_eq!(Cell::text("abc").to_string(), "abc");
    }

    #[test]
    fn test_blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::text("   ").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let t = Table::new([" A ", "B"], vec![vec![Cell::text("x")]]);
        assert_eq!(t.headers, vec!["A", "B"]);
        assert_eq!(t.cell(0, 0), &Cell::text("x"));
        assert_eq!(t.cell(0, 1), &Cell::Empty);
        assert_eq!(t.cell(5, 0), &Cell::Empty);
    }

    #[test]
    fn test_missing_columns_in_required_order() {
        let t = Table::new(["Stock", "Fund"], vec![]);
        assert_eq!(t.missing_columns(&["Order Type", "Stock", "Broker"]), vec!["Order Type", "Broker"]);
    }
}
