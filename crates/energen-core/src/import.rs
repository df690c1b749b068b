//! Bulk-import normalisation: raw tabular rows into client drafts.
//!
//! Rows come from uncontrolled copy-paste out of word processors and
//! spreadsheets, so the mapping is positional and permissive: anything that
//! has a plausible name is accepted and the missing fields are defaulted.
//!
//! # Column layouts
//!
//! - 3+ cells: `name, province, city[, address[, phone]]`
//! - 2 cells: `name, city` (province = configured fallback)
//! - 1 cell: `name` (province and city = "unknown" sentinel)

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::client::{ClientDraft, ClientStatus};

/// First-cell values that mark a header row rather than data.
pub const HEADER_TOKENS: &[&str] = &[
    "name",
    "client",
    "company name",
    "nombre",
    "cliente",
    "razón social",
    "razon social",
    "empresa",
];

/// Minimum name length (in characters) for a row to count as data.
const MIN_NAME_CHARS: usize = 3;

/// Where a row was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrigin {
    #[default]
    Paste,
    /// Quoted CSV text: `""` inside a cell is an escaped quote.
    QuotedCsv,
    Spreadsheet,
    Document,
}

/// One positional row of string cells, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub origin: RowOrigin,
}

impl RawRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_origin(cells, RowOrigin::Paste)
    }

    pub fn with_origin<I, S>(cells: I, origin: RowOrigin) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            origin,
        }
    }
}

/// Per-deployment defaults applied to fields a row does not supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportDefaults {
    /// Province assumed for two-column `name, city` rows.
    pub fallback_province: String,
    /// Sentinel for a province or city that could not be determined.
    pub unknown_location: String,
    /// Sentinel for a missing address or phone.
    pub placeholder: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            fallback_province: "Misiones".to_string(),
            unknown_location: "Desconocida".to_string(),
            placeholder: "-".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefaultsError {
    #[error("import default `{0}` must not be empty")]
    Empty(&'static str),
}

impl ImportDefaults {
    /// Every emitted draft field must be non-empty, so every default must be too.
    pub fn validate(&self) -> Result<(), DefaultsError> {
        for (field, value) in [
            ("fallback_province", &self.fallback_province),
            ("unknown_location", &self.unknown_location),
            ("placeholder", &self.placeholder),
        ] {
            if value.trim().is_empty() {
                return Err(DefaultsError::Empty(field));
            }
        }
        Ok(())
    }
}

/// Column layout of a cleaned row, resolved once per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    ThreeOrMore,
    Exactly2,
    Exactly1,
    Empty,
}

impl RowShape {
    /// Classify by cell count once trailing empty cells are dropped.
    pub fn of(cells: &[String]) -> Self {
        let len = cells
            .iter()
            .rposition(|c| !c.is_empty())
            .map_or(0, |i| i + 1);
        match len {
            0 => Self::Empty,
            1 => Self::Exactly1,
            2 => Self::Exactly2,
            _ => Self::ThreeOrMore,
        }
    }
}

/// Why a row produced no draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    TooShort,
    Header,
}

/// Rows dropped at parse time, by reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipTally {
    pub blank: usize,
    pub too_short: usize,
    pub header: usize,
}

impl SkipTally {
    pub fn total(&self) -> usize {
        self.blank + self.too_short + self.header
    }

    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Blank => self.blank += 1,
            SkipReason::TooShort => self.too_short += 1,
            SkipReason::Header => self.header += 1,
        }
    }
}

/// Drafts accepted from one import, plus what was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizeOutcome {
    pub drafts: Vec<ClientDraft>,
    pub skipped: SkipTally,
}

impl NormalizeOutcome {
    /// Rows seen, accepted or not.
    pub fn processed(&self) -> usize {
        self.drafts.len() + self.skipped.total()
    }
}

/// Turn raw rows into client drafts, preserving input order.
///
/// Never fails: rows without a usable name are counted in
/// [`NormalizeOutcome::skipped`] and dropped. No deduplication is attempted.
pub fn normalize(rows: &[RawRow], defaults: &ImportDefaults) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, defaults) {
            Ok(draft) => outcome.drafts.push(draft),
            Err(reason) => {
                debug!(row = index, ?reason, "skipping import row");
                outcome.skipped.record(reason);
            }
        }
    }

    info!(
        accepted = outcome.drafts.len(),
        skipped = outcome.skipped.total(),
        "normalised import rows"
    );
    outcome
}

/// Map a single row to a draft, or say why it was rejected.
pub fn normalize_row(row: &RawRow, defaults: &ImportDefaults) -> Result<ClientDraft, SkipReason> {
    let first_blank = row.cells.first().is_none_or(|c| c.trim().is_empty());
    if first_blank {
        return Err(SkipReason::Blank);
    }

    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|c| clean_cell(c, row.origin))
        .collect();

    let name = cells[0].as_str();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(SkipReason::TooShort);
    }
    if is_header(name) {
        return Err(SkipReason::Header);
    }

    let cell = |i: usize, fallback: &str| -> String {
        match cells.get(i) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => fallback.to_string(),
        }
    };
    let unknown = defaults.unknown_location.as_str();
    let placeholder = defaults.placeholder.as_str();

    let (province, city, address, phone) = match RowShape::of(&cells) {
        RowShape::ThreeOrMore => (
            cell(1, unknown),
            cell(2, unknown),
            cell(3, placeholder),
            cell(4, placeholder),
        ),
        RowShape::Exactly2 => (
            defaults.fallback_province.clone(),
            cell(1, unknown),
            placeholder.to_string(),
            placeholder.to_string(),
        ),
        RowShape::Exactly1 | RowShape::Empty => (
            unknown.to_string(),
            unknown.to_string(),
            placeholder.to_string(),
            placeholder.to_string(),
        ),
    };

    Ok(ClientDraft {
        name: name.to_string(),
        province,
        city,
        address,
        phone,
        status: ClientStatus::Active,
    })
}

/// Trim, strip one pair of surrounding quotes, and unescape `""` for CSV rows.
pub fn clean_cell(raw: &str, origin: RowOrigin) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    let unescaped = if origin == RowOrigin::QuotedCsv {
        unquoted.replace("\"\"", "\"")
    } else {
        unquoted.to_string()
    };
    unescaped.trim().to_string()
}

fn is_header(name: &str) -> bool {
    let lower = name.to_lowercase();
    HEADER_TOKENS.iter().any(|t| *t == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ImportDefaults {
        ImportDefaults::default()
    }

    fn run(rows: Vec<RawRow>) -> NormalizeOutcome {
        normalize(&rows, &defaults())
    }

    #[test]
    fn empty_input_yields_nothing() {
        let out = run(vec![]);
        assert!(out.drafts.is_empty());
        assert_eq!(out.skipped.total(), 0);
        assert_eq!(out.processed(), 0);
    }

    #[test]
    fn mixed_layouts() {
        let out = run(vec![
            RawRow::new(["Acme S.A.", "Misiones", "Posadas", "Av. 1", "+549..."]),
            RawRow::new(["Finca del Sur", "Corrientes", "Goya"]),
            RawRow::new(["Taller Don Pepe"]),
        ]);
        assert_eq!(out.drafts.len(), 3);

        let acme = &out.drafts[0];
        assert_eq!(acme.name, "Acme S.A.");
        assert_eq!(acme.province, "Misiones");
        assert_eq!(acme.city, "Posadas");
        assert_eq!(acme.address, "Av. 1");
        assert_eq!(acme.phone, "+549...");
        assert_eq!(acme.status, ClientStatus::Active);

        let finca = &out.drafts[1];
        assert_eq!(finca.province, "Corrientes");
        assert_eq!(finca.city, "Goya");
        assert_eq!(finca.address, "-");
        assert_eq!(finca.phone, "-");

        let taller = &out.drafts[2];
        assert_eq!(taller.name, "Taller Don Pepe");
        assert_eq!(taller.province, "Desconocida");
        assert_eq!(taller.city, "Desconocida");
        assert_eq!(taller.address, "-");
    }

    #[test]
    fn two_columns_use_fallback_province() {
        let out = run(vec![RawRow::new(["Aserradero El Pino", "Virasoro"])]);
        let d = &out.drafts[0];
        assert_eq!(d.province, "Misiones");
        assert_eq!(d.city, "Virasoro");
    }

    #[test]
    fn fallback_province_is_configurable() {
        let custom = ImportDefaults {
            fallback_province: "Chaco".into(),
            unknown_location: "Unknown".into(),
            placeholder: "n/a".into(),
        };
        let out = normalize(
            &[
                RawRow::new(["Molino Norte", "Resistencia"]),
                RawRow::new(["Solo Nombre"]),
            ],
            &custom,
        );
        assert_eq!(out.drafts[0].province, "Chaco");
        assert_eq!(out.drafts[0].phone, "n/a");
        assert_eq!(out.drafts[1].city, "Unknown");
    }

    #[test]
    fn four_columns_leave_phone_defaulted() {
        let out = run(vec![RawRow::new([
            "Hotel Iguazú",
            "Misiones",
            "Puerto Iguazú",
            "Av. Victoria Aguirre 10",
        ])]);
        let d = &out.drafts[0];
        assert_eq!(d.address, "Av. Victoria Aguirre 10");
        assert_eq!(d.phone, "-");
    }

    #[test]
    fn trailing_empty_cells_do_not_change_shape() {
        let out = run(vec![RawRow::new(["Finca del Sur", "Goya", "", ""])]);
        let d = &out.drafts[0];
        assert_eq!(d.province, "Misiones");
        assert_eq!(d.city, "Goya");
    }

    #[test]
    fn empty_inner_cells_take_defaults() {
        let out = run(vec![RawRow::new([
            "Estancia La Cruz",
            "",
            "Apóstoles",
            "",
            "3758-4000",
        ])]);
        let d = &out.drafts[0];
        assert_eq!(d.province, "Desconocida");
        assert_eq!(d.city, "Apóstoles");
        assert_eq!(d.address, "-");
        assert_eq!(d.phone, "3758-4000");
    }

    #[test]
    fn short_names_are_skipped() {
        let out = run(vec![
            RawRow::new(["AB", "Misiones", "Posadas"]),
            RawRow::new(["  x  "]),
            RawRow::new(["\"AB\""]),
            RawRow::new(["ABC"]),
        ]);
        assert_eq!(out.drafts.len(), 1);
        assert_eq!(out.drafts[0].name, "ABC");
        assert_eq!(out.skipped.too_short, 3);
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let out = run(vec![RawRow::new(["Ñá"]), RawRow::new(["Ñañ"])]);
        assert_eq!(out.drafts.len(), 1);
        assert_eq!(out.drafts[0].name, "Ñañ");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let out = run(vec![
            RawRow::default(),
            RawRow::new(["   ", "Misiones"]),
            RawRow::new(["Acme S.A."]),
        ]);
        assert_eq!(out.drafts.len(), 1);
        assert_eq!(out.skipped.blank, 2);
        assert_eq!(out.processed(), 3);
    }

    #[test]
    fn header_rows_are_skipped() {
        let out = run(vec![
            RawRow::new(["Nombre", "Provincia", "Ciudad"]),
            RawRow::new(["COMPANY NAME", "City"]),
            RawRow::new(["Razón Social"]),
            RawRow::new(["Clientes del Norte"]),
        ]);
        assert_eq!(out.skipped.header, 3);
        assert_eq!(out.drafts.len(), 1);
        assert_eq!(out.drafts[0].name, "Clientes del Norte");
    }

    #[test]
    fn order_is_preserved_without_dedup() {
        let out = run(vec![
            RawRow::new(["Zeta SRL"]),
            RawRow::new(["no"]),
            RawRow::new(["Alfa SA"]),
            RawRow::new(["Zeta SRL"]),
        ]);
        let names: Vec<&str> = out.drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta SRL", "Alfa SA", "Zeta SRL"]);
    }

    #[test]
    fn quotes_are_stripped() {
        let out = run(vec![RawRow::new([
            "\"Acme S.A.\"",
            " \"Misiones\" ",
            "\"Posadas\"",
        ])]);
        let d = &out.drafts[0];
        assert_eq!(d.name, "Acme S.A.");
        assert_eq!(d.province, "Misiones");
        assert_eq!(d.city, "Posadas");
    }

    #[test]
    fn doubled_quotes_collapse_only_for_csv() {
        assert_eq!(
            clean_cell("\"Bar \"\"El Tano\"\"\"", RowOrigin::QuotedCsv),
            "Bar \"El Tano\""
        );
        assert_eq!(
            clean_cell("\"Bar \"\"El Tano\"\"\"", RowOrigin::Spreadsheet),
            "Bar \"\"El Tano\"\""
        );
        assert_eq!(clean_cell("\"", RowOrigin::Paste), "\"");
    }

    #[test]
    fn every_emitted_field_is_populated() {
        let rows = vec![
            RawRow::new(["Acme", "", "", "", ""]),
            RawRow::new(["Beta", ""]),
            RawRow::new(["Gamma", "P", "C", "A", "T", "extra"]),
        ];
        let out = run(rows);
        assert_eq!(out.drafts.len(), 3);
        for d in &out.drafts {
            assert!(d.name.chars().count() > 2);
            for field in [&d.province, &d.city, &d.address, &d.phone] {
                assert!(!field.is_empty(), "empty field in {d:?}");
            }
        }
    }

    #[test]
    fn row_shape_dispatch() {
        let cells = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(RowShape::of(&cells(&[])), RowShape::Empty);
        assert_eq!(RowShape::of(&cells(&["", ""])), RowShape::Empty);
        assert_eq!(RowShape::of(&cells(&["a"])), RowShape::Exactly1);
        assert_eq!(RowShape::of(&cells(&["a", "b", ""])), RowShape::Exactly2);
        assert_eq!(RowShape::of(&cells(&["a", "", "c"])), RowShape::ThreeOrMore);
    }

    #[test]
    fn defaults_validation() {
        assert!(ImportDefaults::default().validate().is_ok());
        let bad = ImportDefaults {
            placeholder: " ".into(),
            ..ImportDefaults::default()
        };
        assert_eq!(bad.validate(), Err(DefaultsError::Empty("placeholder")));
    }

    #[test]
    fn defaults_deserialise_with_partial_overrides() {
        let parsed: ImportDefaults =
            serde_json::from_str(r#"{"fallback_province": "Corrientes"}"#).unwrap();
        assert_eq!(parsed.fallback_province, "Corrientes");
        assert_eq!(parsed.unknown_location, "Desconocida");
        assert_eq!(parsed.placeholder, "-");
    }
}
