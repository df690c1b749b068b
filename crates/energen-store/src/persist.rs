//! Insert normalised drafts one at a time and tally the results.

use async_trait::async_trait;
use energen_core::ClientDraft;
use tracing::{info, warn};

use crate::StoreError;

/// Anything that can store one client draft.
#[async_trait]
pub trait ClientSink: Send + Sync {
    async fn insert_client(&self, draft: &ClientDraft) -> Result<(), StoreError>;
}

/// A draft the backend refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of persisting a batch of drafts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub failures: Vec<InsertFailure>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Insert each draft in order, awaiting one before starting the next.
///
/// A failed insert (typically a uniqueness violation on the name) is logged
/// and counted; it never stops the remaining drafts.
pub async fn persist_drafts<S>(sink: &S, drafts: &[ClientDraft]) -> ImportReport
where
    S: ClientSink + ?Sized,
{
    let mut report = ImportReport::default();
    for draft in drafts {
        match sink.insert_client(draft).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                warn!(name = %draft.name, error = %e, "client insert failed");
                report.failures.push(InsertFailure {
                    name: draft.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    info!(
        inserted = report.inserted,
        failed = report.failed(),
        "persisted client drafts"
    );
    report
}
