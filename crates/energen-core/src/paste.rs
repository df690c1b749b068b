//! Split pasted text into raw rows.
//!
//! Tab-separated input (what Excel and Word tables put on the clipboard) is
//! preferred. A line with no tab falls back to comma or semicolon
//! separation; if that line contains quotes it is split as quoted CSV.

use crate::import::{RawRow, RowOrigin};

/// Split a pasted block into one [`RawRow`] per non-blank line.
pub fn split_pasted_text(text: &str) -> Vec<RawRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_line)
        .collect()
}

/// Split one line using the tab-first, then comma/semicolon rule.
pub fn split_line(line: &str) -> RawRow {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let tabbed: Vec<&str> = line.split('\t').collect();
    if tabbed.len() >= 2 {
        return RawRow::with_origin(tabbed, RowOrigin::Paste);
    }
    if line.contains('"') {
        RawRow::with_origin(split_quoted(line), RowOrigin::QuotedCsv)
    } else {
        RawRow::with_origin(line.split([',', ';']), RowOrigin::Paste)
    }
}

/// Quote-aware split on `,` / `;`.
///
/// Cells keep their surrounding quotes and doubled inner quotes;
/// [`clean_cell`](crate::import::clean_cell) removes them later.
fn split_quoted(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' | ';' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}
