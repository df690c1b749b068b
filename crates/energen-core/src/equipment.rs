//! Installed equipment, service history, and document records.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A unit installed at a client site.
///
/// `client_name` and `client_city` are denormalised display fields filled in
/// by whoever fetched the rows; nothing in this crate performs the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub client_id: String,
    pub model: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub kva: Option<f64>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub alternator: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Unparseable values read as `None`.
    #[serde(default, deserialize_with = "lenient_date")]
    pub next_service_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_city: Option<String>,
}

/// A maintenance visit recorded against a client (and optionally one unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub client_id: String,
    #[serde(default)]
    pub equipment_id: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub technician: String,
}

/// Category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Image,
    Report,
    Invoice,
    Budget,
    Other,
}

/// Metadata for a file held in the external blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub client_id: String,
    pub file_name: String,
    pub file_path: String,
    #[serde(rename = "file_type")]
    pub kind: DocumentKind,
    /// ISO 8601 timestamp string.
    pub created_at: String,
}

/// Parse a stored due date, discarding any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (date taken in the timestamp's
/// own offset) and naive `YYYY-MM-DD[T ]HH:MM:SS` forms. Anything else is
/// `None`.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => parse_service_date(&s),
        _ => None,
    })
}
