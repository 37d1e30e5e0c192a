//! Relay core: wire models, language mapping, backend selection and the upstream client

pub mod client;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod language;
pub mod models;
pub mod usage_tracker;
