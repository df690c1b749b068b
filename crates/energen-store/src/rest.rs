//! REST client for the hosted backend's auto-generated table API.

use async_trait::async_trait;
use energen_core::{Client, ClientDraft, Equipment, Service};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{ClientSink, StoreError};

/// Client for the `/rest/v1/<table>` endpoints.
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Owning client's display fields, embedded by the `clients(name, city)` select.
#[derive(Debug, Deserialize)]
struct ClientRef {
    name: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EquipmentRow {
    #[serde(flatten)]
    equipment: Equipment,
    #[serde(default)]
    clients: Option<ClientRef>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        let mut equipment = row.equipment;
        if let Some(owner) = row.clients {
            equipment.client_name = owner.name;
            equipment.client_city = owner.city;
        }
        equipment
    }
}

impl RestClient {
    /// Create a client for the given project URL.
    ///
    /// `base_url` should be like `https://xyz.supabase.co` (no trailing slash).
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{table}", self.base_url)
        } else {
            format!("{}/rest/v1/{table}?{query}", self.base_url)
        }
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key).bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table, query);
        info!(url = %url, "fetching rows");
        let resp = self.authed(self.client.get(&url)).send().await?;
        let resp = check_status(resp).await?;
        let rows: Vec<T> = resp.json().await?;
        info!(table, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    /// All clients, newest first.
    pub async fn fetch_clients(&self) -> Result<Vec<Client>, StoreError> {
        self.select("clients", "select=*&order=created_at.desc").await
    }

    /// All equipment with the owning client's name and city filled in.
    pub async fn fetch_equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        let rows: Vec<EquipmentRow> = self
            .select("equipment", "select=*,clients(name,city)")
            .await?;
        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    /// All recorded services, most recent first.
    pub async fn fetch_services(&self) -> Result<Vec<Service>, StoreError> {
        self.select("services", "select=*&order=date.desc").await
    }
}

#[async_trait]
impl ClientSink for RestClient {
    async fn insert_client(&self, draft: &ClientDraft) -> Result<(), StoreError> {
        let url = self.table_url("clients", "");
        let resp = self
            .authed(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(draft)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Server {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = RestClient::new("https://demo.supabase.co/".into(), "key".into());
        assert_eq!(client.base_url, "https://demo.supabase.co");
    }

    #[test]
    fn table_urls() {
        let client = RestClient::new("https://demo.supabase.co".into(), "key".into());
        assert_eq!(
            client.table_url("clients", ""),
            "https://demo.supabase.co/rest/v1/clients"
        );
        assert_eq!(
            client.table_url("equipment", "select=*,clients(name,city)"),
            "https://demo.supabase.co/rest/v1/equipment?select=*,clients(name,city)"
        );
    }

    #[test]
    fn equipment_row_takes_joined_client_fields() {
        let json = r#"[{
            "id": "e1",
            "client_id": "c1",
            "model": "FG Wilson P110",
            "type": "Generador",
            "kva": 110,
            "next_service_date": "2026-11-01",
            "clients": {"name": "Acme S.A.", "city": "Posadas"}
        }, {
            "id": "e2",
            "client_id": "c9",
            "model": "Tablero TTA",
            "type": "Tablero",
            "next_service_date": "sin fecha",
            "clients": null
        }]"#;
        let rows: Vec<EquipmentRow> = serde_json::from_str(json).unwrap();
        let equipment: Vec<Equipment> = rows.into_iter().map(Equipment::from).collect();

        assert_eq!(equipment[0].client_name.as_deref(), Some("Acme S.A."));
        assert_eq!(equipment[0].client_city.as_deref(), Some("Posadas"));
        assert_eq!(equipment[0].kva, Some(110.0));
        assert!(equipment[0].next_service_date.is_some());

        assert!(equipment[1].client_name.is_none());
        assert!(equipment[1].next_service_date.is_none());
    }

    #[test]
    fn server_error_message() {
        let err = StoreError::Server {
            status: 409,
            body: "duplicate key".into(),
        };
        assert_eq!(err.to_string(), "backend returned 409: duplicate key");
    }
}
