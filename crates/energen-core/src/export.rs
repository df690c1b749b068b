//! Client list search and CSV export.

use chrono::NaiveDate;

use crate::client::Client;

const CSV_HEADERS: &[&str] = &[
    "ID",
    "Nombre",
    "Provincia",
    "Ciudad",
    "Dirección",
    "Teléfono",
    "Estado",
];

/// Render clients as CSV with every field quoted.
pub fn clients_to_csv(clients: &[Client]) -> String {
    let mut lines = Vec::with_capacity(clients.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for c in clients {
        let fields = [
            c.id.as_str(),
            c.name.as_str(),
            c.province.as_str(),
            c.city.as_str(),
            c.address.as_str(),
            c.phone.as_str(),
            c.status.as_str(),
        ];
        let quoted: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        lines.push(quoted.join(","));
    }
    lines.join("\n")
}

/// Download name for an export taken on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("clientes_energen_{}.csv", today.format("%Y-%m-%d"))
}

/// Case-insensitive substring search over name, city, and province.
///
/// An empty term matches everything.
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let needle = term.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| {
            needle.is_empty()
                || [&c.name, &c.city, &c.province]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
