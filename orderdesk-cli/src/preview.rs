//! Plain-text table rendering for terminal previews.

use orderdesk_core::Table;

/// Widest a single column is allowed to print.
const MAX_COL_WIDTH: usize = 32;

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// Render the table with left-aligned, padded columns and a dashed rule
/// under the header.
pub fn render_table(table: &Table) -> String {
    let cols = table
        .headers
        .len()
        .max(table.rows.iter().map(Vec::len).max().unwrap_or(0));

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| (0..cols).map(|c| r.get(c).map(|v| v.as_text()).unwrap_or_default()).collect())
        .collect();

    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            let header = table.headers.get(c).map_or(0, |h| h.chars().count());
            let body = cells.iter().map(|r| r[c].chars().count()).max().unwrap_or(0);
            header.max(body).min(MAX_COL_WIDTH)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", clip(v, *w), w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(cells.len() + 2);
    out.push(line((0..cols).map(|c| table.headers.get(c).map_or("", String::as_str)).collect()));
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}
