//! Core library surface for the Patient Records Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the CSV-backed record store, the domain types, the chart
//! computations, and the interactive front end.

pub mod charts;
pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer. These are what
/// `main.rs` uses to locate the backing file and hydrate the store.
pub use store::{default_store_path, AddOutcome, MutateOutcome, RecordStore, StoreError};

/// The domain types that other layers manipulate.
pub use models::{Age, Patient, PatientId};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
