//! Translate widget assets: what to download and where it lives on disk

pub mod catalog;
pub mod fetcher;

pub use catalog::{Asset, ASSETS, SCRIPT_VERSION};
pub use fetcher::AssetFetcher;
