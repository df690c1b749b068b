//! Plain-text rendering for the terminal.

use energen_core::import::SkipTally;
use energen_core::{AlertEntry, AlertReport, ClientDraft, DashboardSummary, Urgency};
use energen_store::ImportReport;

const MAX_FAILURES_SHOWN: usize = 10;

// ── Import ──

pub fn print_drafts(drafts: &[ClientDraft]) {
    println!(
        "{:<32} {:<14} {:<20} {:<24} {}",
        "NAME", "PROVINCE", "CITY", "ADDRESS", "PHONE"
    );
    for d in drafts {
        println!(
            "{:<32} {:<14} {:<20} {:<24} {}",
            d.name, d.province, d.city, d.address, d.phone
        );
    }
}

/// One-line summary: counts only, no per-row detail.
pub fn import_summary(
    accepted: usize,
    skipped: &SkipTally,
    report: Option<&ImportReport>,
) -> String {
    let mut line = match report {
        Some(r) => format!("{} imported, {} skipped", r.inserted, skipped.total()),
        None => format!("{accepted} ready to import, {} skipped", skipped.total()),
    };
    if let Some(r) = report
        && r.failed() > 0
    {
        line.push_str(&format!(", {} failed (possibly duplicates)", r.failed()));
    }
    line
}

pub fn print_failures(report: &ImportReport) {
    for f in report.failures.iter().take(MAX_FAILURES_SHOWN) {
        eprintln!("  failed: {} ({})", f.name, f.error);
    }
    if report.failed() > MAX_FAILURES_SHOWN {
        eprintln!("  ... and {} more", report.failed() - MAX_FAILURES_SHOWN);
    }
}

// ── Alerts ──

pub fn print_alerts(report: &AlertReport) {
    if report.alerts.is_empty() {
        println!("No maintenance due.");
    }
    for entry in &report.alerts {
        println!("{}", alert_line(entry));
    }
    println!();
    println!(
        "{} overdue, {} urgent, {} upcoming ({} units with a service date)",
        report.overdue_count, report.urgent_count, report.upcoming_count, report.tracked_count
    );
}

pub fn alert_line(entry: &AlertEntry) -> String {
    let when = match entry.urgency {
        Urgency::Overdue => format!("{} days overdue", -entry.days_delta),
        _ if entry.days_delta == 0 => "due today".to_string(),
        _ => format!("in {} days", entry.days_delta),
    };
    let eq = &entry.equipment;
    let client = match (&eq.client_name, &eq.client_city) {
        (Some(name), Some(city)) => format!("{name} ({city})"),
        (Some(name), None) => name.clone(),
        _ => eq.client_id.clone(),
    };
    format!(
        "{:<9} {} {:<16} {:<24} {}",
        entry.urgency.label(),
        entry.due,
        when,
        eq.model,
        client
    )
}

// ── Dashboard ──

pub fn print_dashboard(summary: &DashboardSummary) {
    let rows = [
        ("Total clients", summary.total_clients),
        ("Clients in maintenance", summary.clients_in_maintenance),
        ("Services this month", summary.services_this_month),
        ("Equipment", summary.total_equipment),
        ("Overdue services", summary.overdue_equipment),
        ("Urgent services", summary.urgent_equipment),
        ("Upcoming services", summary.upcoming_equipment),
    ];
    for (label, value) in rows {
        println!("  {:<26} {}", label, value);
    }
}
