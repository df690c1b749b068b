pub mod alerts;
pub mod client;
pub mod dashboard;
pub mod equipment;
pub mod export;
pub mod import;
pub mod paste;

pub use alerts::{AlertEntry, AlertReport, Urgency, evaluate};
pub use client::{Client, ClientDraft, ClientStatus, known_locations};
pub use dashboard::DashboardSummary;
pub use equipment::{Document, DocumentKind, Equipment, Service};
pub use import::{ImportDefaults, NormalizeOutcome, RawRow, RowOrigin, normalize};
pub use paste::split_pasted_text;
