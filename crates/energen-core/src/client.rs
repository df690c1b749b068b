//! Client records as stored in the backend `clients` collection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Lifecycle state of a client account.
///
/// The backend stores the Spanish labels, so serde maps to those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClientStatus {
    #[default]
    #[serde(rename = "Activo")]
    Active,
    #[serde(rename = "Mantenimiento")]
    Maintenance,
    #[serde(rename = "Suspendido")]
    Suspended,
}

impl ClientStatus {
    /// Label as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Maintenance => "Mantenimiento",
            Self::Suspended => "Suspendido",
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, default-filled candidate client ready to be inserted.
///
/// Produced by [`normalize`](crate::import::normalize). Serialises to exactly
/// the column set of one `clients` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub province: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub status: ClientStatus,
}

/// A persisted client row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    /// ISO 8601 timestamp string.
    pub created_at: String,
    pub name: String,
    pub province: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub status: ClientStatus,
}

/// Read-only snapshot of province → cities seen across existing clients.
///
/// Used to seed location suggestions when a client form opens; callers take a
/// fresh snapshot each time instead of accumulating state.
pub fn known_locations(clients: &[Client]) -> BTreeMap<String, BTreeSet<String>> {
    let mut locations: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for client in clients {
        let province = client.province.trim();
        if province.is_empty() {
            continue;
        }
        let cities = locations.entry(province.to_string()).or_default();
        let city = client.city.trim();
        if !city.is_empty() {
            cities.insert(city.to_string());
        }
    }
    locations
}
