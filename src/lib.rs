//! Core library surface for the FlowState songwriting notebook.
//!
//! The `bin` target wires these pieces together; integration tests drive the
//! router directly against an in-memory store.
pub mod config;
pub mod db;
pub mod models;
pub mod web;

/// Convenience re-exports for the persistence layer used during startup.
pub use db::{open_store, seed_demo_data};

/// The two domain types every layer passes around.
pub use models::{Song, Verse};

/// Router construction and the state it carries.
pub use web::{build_router, AppState};
