//! Persistence layer: draft insertion tally and the hosted backend's REST API.

mod error;
pub mod persist;

pub use error::StoreError;
pub use persist::{ClientSink, ImportReport, InsertFailure, persist_drafts};

#[cfg(feature = "http")]
pub mod rest;
#[cfg(feature = "http")]
pub use rest::RestClient;
