//! Read an import file into raw rows.

use std::path::Path;

use anyhow::Context;
use energen_core::{RawRow, split_pasted_text};

/// Read a text/CSV file and split it into rows.
///
/// A leading UTF-8 byte-order mark (common in spreadsheet CSV exports) is dropped.
pub async fn read_rows(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading import file {}", path.display()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(split_pasted_text(text))
}
