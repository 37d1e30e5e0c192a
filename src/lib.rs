//! Translate Relay - Google Translate compatible relay in front of Lingvanex
//!
//! This library provides the relay HTTP server, a fetcher for the translate
//! widget's static assets, and one-shot probes for a running relay.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assets;
pub mod cli;
pub mod core;
pub mod probes;
pub mod server;

// Re-export key types for convenience
pub use self::core::{
    client::LnxClient,
    config::{AssetConfig, FetchBackend, ProbeConfig, RelayConfig},
    endpoints::EndpointConfiguration,
    errors::{RelayError, Result},
    models::{GoogleLanguageList, LnxTranslateRequest, TranslateParams},
};

pub use assets::AssetFetcher;
pub use probes::{ProbePayload, ProbePreset, RelayProbe};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
