//! Relay HTTP server

pub mod api;
pub mod static_files;

pub use api::{build_router, run_server, AppState};
