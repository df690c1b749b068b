//! Maintenance-due alerting.
//!
//! Classifies equipment by how far its next service date is from an
//! explicitly supplied `today`. Overdue units are always surfaced no matter
//! how late they are; future dates are only surfaced inside the horizon.

use chrono::NaiveDate;
use serde::Serialize;

use crate::equipment::Equipment;

/// Default look-ahead for upcoming services.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// Dates this close (inclusive) are urgent rather than upcoming.
pub const URGENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Urgency {
    Overdue,
    Urgent,
    Upcoming,
}

impl Urgency {
    /// Classify a signed day delta; `None` means beyond the horizon.
    pub fn classify(days_delta: i64, horizon_days: i64) -> Option<Self> {
        if days_delta < 0 {
            Some(Self::Overdue)
        } else if days_delta > horizon_days {
            None
        } else if days_delta <= URGENT_WINDOW_DAYS {
            Some(Self::Urgent)
        } else {
            Some(Self::Upcoming)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::Upcoming => "upcoming",
        }
    }
}

/// One unit due for service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub equipment: Equipment,
    pub due: NaiveDate,
    pub urgency: Urgency,
    /// Negative = days overdue, positive = days remaining.
    pub days_delta: i64,
}

/// Classified alerts plus aggregate counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlertReport {
    /// Sorted ascending by due date, earliest first.
    pub alerts: Vec<AlertEntry>,
    pub overdue_count: usize,
    pub urgent_count: usize,
    pub upcoming_count: usize,
    /// Units carrying any service date, in or out of the horizon.
    pub tracked_count: usize,
}

/// Whole calendar days from `today` to `due`.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Classify and sort equipment by maintenance urgency.
///
/// Units without a (parseable) service date are ignored entirely. Units
/// further out than `horizon_days` are left out of `alerts` and counted only
/// in `tracked_count`.
pub fn evaluate(equipment: &[Equipment], today: NaiveDate, horizon_days: i64) -> AlertReport {
    let mut report = AlertReport::default();

    for item in equipment {
        let Some(due) = item.next_service_date else {
            continue;
        };
        report.tracked_count += 1;

        let days_delta = days_until(due, today);
        let Some(urgency) = Urgency::classify(days_delta, horizon_days) else {
            continue;
        };
        match urgency {
            Urgency::Overdue => report.overdue_count += 1,
            Urgency::Urgent => report.urgent_count += 1,
            Urgency::Upcoming => report.upcoming_count += 1,
        }
        report.alerts.push(AlertEntry {
            equipment: item.clone(),
            due,
            urgency,
            days_delta,
        });
    }

    // Stable: ties keep input order.
    report.alerts.sort_by_key(|a| a.due);
    report
}
