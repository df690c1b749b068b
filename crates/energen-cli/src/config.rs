//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use energen_core::ImportDefaults;
use energen_core::alerts::DEFAULT_HORIZON_DAYS;
use energen_store::RestClient;

#[derive(Debug, Parser)]
#[command(name = "energen", version, about = "Generator maintenance back office")]
pub struct Cli {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub defaults: DefaultsArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import clients from pasted text or a CSV export.
    Import {
        /// Text file with one client per line (TAB, comma, or semicolon separated).
        file: PathBuf,
        /// Print the normalised drafts without inserting them.
        #[arg(long)]
        dry_run: bool,
    },
    /// List equipment that is overdue or due for service soon.
    Alerts {
        #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
        horizon_days: i64,
        /// Evaluate as of this date instead of the local date (YYYY-MM-DD).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show headline counts.
    Dashboard {
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Write all clients to a CSV file.
    Export {
        /// Output path; defaults to `clientes_energen_<date>.csv`.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Only export clients whose name, city, or province contains this.
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    /// Base URL of the hosted backend project.
    #[arg(long, env = "ENERGEN_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// API key sent with every backend request.
    #[arg(long, env = "ENERGEN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,
}

impl BackendArgs {
    pub fn client(&self) -> anyhow::Result<RestClient> {
        let url = self
            .backend_url
            .clone()
            .context("backend URL not set (--backend-url or ENERGEN_BACKEND_URL)")?;
        let key = self
            .api_key
            .clone()
            .context("API key not set (--api-key or ENERGEN_API_KEY)")?;
        Ok(RestClient::new(url, key))
    }
}

#[derive(Debug, Clone, Args)]
pub struct DefaultsArgs {
    /// Province assumed for `name, city` rows.
    #[arg(long, env = "ENERGEN_FALLBACK_PROVINCE", global = true)]
    pub fallback_province: Option<String>,

    /// Value used when a province or city is unknown.
    #[arg(long, env = "ENERGEN_UNKNOWN_LOCATION", global = true)]
    pub unknown_location: Option<String>,
}

impl DefaultsArgs {
    /// Built-in defaults with any overrides applied, validated.
    pub fn resolve(&self) -> anyhow::Result<ImportDefaults> {
        let mut defaults = ImportDefaults::default();
        if let Some(p) = &self.fallback_province {
            defaults.fallback_province = p.clone();
        }
        if let Some(u) = &self.unknown_location {
            defaults.unknown_location = u.clone();
        }
        defaults.validate()?;
        Ok(defaults)
    }
}

/// `today` from the command line, or the local calendar date.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}
