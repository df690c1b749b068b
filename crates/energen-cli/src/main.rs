mod config;
mod display;
mod input;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use energen_core::export::{clients_to_csv, export_file_name, filter_clients};
use energen_core::{Client, DashboardSummary, evaluate, normalize};
use energen_store::persist_drafts;
use tracing::info;

use config::{Cli, Command, resolve_today};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    info!("energen v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Import { file, dry_run } => {
            let defaults = cli.defaults.resolve()?;
            let rows = input::read_rows(&file).await?;
            let outcome = normalize(&rows, &defaults);

            if dry_run {
                display::print_drafts(&outcome.drafts);
                println!(
                    "{}",
                    display::import_summary(outcome.drafts.len(), &outcome.skipped, None)
                );
                return Ok(());
            }

            let store = cli.backend.client()?;
            let report = persist_drafts(&store, &outcome.drafts).await;
            println!(
                "{}",
                display::import_summary(outcome.drafts.len(), &outcome.skipped, Some(&report))
            );
            display::print_failures(&report);
        }
        Command::Alerts {
            horizon_days,
            today,
        } => {
            let store = cli.backend.client()?;
            let equipment = store
                .fetch_equipment()
                .await
                .context("fetching equipment")?;
            let report = evaluate(&equipment, resolve_today(today), horizon_days);
            display::print_alerts(&report);
        }
        Command::Dashboard { today } => {
            let store = cli.backend.client()?;
            let clients = store.fetch_clients().await.context("fetching clients")?;
            let equipment = store
                .fetch_equipment()
                .await
                .context("fetching equipment")?;
            let services = store.fetch_services().await.context("fetching services")?;
            let summary =
                DashboardSummary::compute(&clients, &equipment, &services, resolve_today(today));
            display::print_dashboard(&summary);
        }
        Command::Export { out, search } => {
            let store = cli.backend.client()?;
            let clients = store.fetch_clients().await.context("fetching clients")?;
            if clients.is_empty() {
                anyhow::bail!("no clients to export");
            }
            let selected: Vec<Client> = match &search {
                Some(term) => filter_clients(&clients, term).into_iter().cloned().collect(),
                None => clients,
            };
            let path =
                out.unwrap_or_else(|| PathBuf::from(export_file_name(resolve_today(None))));
            tokio::fs::write(&path, clients_to_csv(&selected))
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(count = selected.len(), path = %path.display(), "exported clients");
            println!("Exported {} clients to {}", selected.len(), path.display());
        }
    }

    Ok(())
}
