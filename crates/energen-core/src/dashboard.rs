//! Headline counts for the operations dashboard.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::alerts::{DEFAULT_HORIZON_DAYS, evaluate};
use crate::client::{Client, ClientStatus};
use crate::equipment::{Equipment, Service};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub clients_in_maintenance: usize,
    /// Services dated in the same calendar month as `today`.
    pub services_this_month: usize,
    pub total_equipment: usize,
    pub overdue_equipment: usize,
    pub urgent_equipment: usize,
    pub upcoming_equipment: usize,
}

impl DashboardSummary {
    pub fn compute(
        clients: &[Client],
        equipment: &[Equipment],
        services: &[Service],
        today: NaiveDate,
    ) -> Self {
        let alerts = evaluate(equipment, today, DEFAULT_HORIZON_DAYS);
        Self {
            total_clients: clients.len(),
            clients_in_maintenance: clients
                .iter()
                .filter(|c| c.status == ClientStatus::Maintenance)
                .count(),
            services_this_month: services
                .iter()
                .filter(|s| s.date.year() == today.year() && s.date.month() == today.month())
                .count(),
            total_equipment: equipment.len(),
            overdue_equipment: alerts.overdue_count,
            urgent_equipment: alerts.urgent_count,
            upcoming_equipment: alerts.upcoming_count,
        }
    }
}
