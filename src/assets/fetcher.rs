//! Sequential asset downloader

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::assets::catalog::{Asset, ASSETS};
use crate::core::config::{AssetConfig, FetchBackend};
use crate::core::errors::{RelayError, Result};

/// Downloads the widget assets one after another.
///
/// The first failure aborts the run, nothing is retried.
#[derive(Debug, Clone)]
pub struct AssetFetcher {
    config: AssetConfig,
    client: reqwest::Client,
}

impl AssetFetcher {
    /// Create a new fetcher
    pub fn new(config: AssetConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch every catalog asset, returning the written paths
    pub async fn fetch_all(&self) -> Result<Vec<PathBuf>> {
        self.fetch_assets(ASSETS).await
    }

    /// Fetch the given assets in order
    pub async fn fetch_assets(&self, assets: &[Asset]) -> Result<Vec<PathBuf>> {
        let pb = ProgressBar::new(assets.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        let mut written = Vec::with_capacity(assets.len());
        for asset in assets {
            pb.set_message(asset.name);
            match self.fetch(asset).await {
                Ok(path) => {
                    written.push(path);
                    pb.inc(1);
                }
                Err(e) => {
                    pb.abandon_with_message(format!("Failed: {}", asset.name));
                    return Err(e);
                }
            }
        }

        pb.finish_with_message("Completed");
        Ok(written)
    }

    /// Download one asset to its place below the output root
    pub async fn fetch(&self, asset: &Asset) -> Result<PathBuf> {
        let url = asset.url(&self.config.widget_host);
        let path = asset.output_path(&self.config.out_root);

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| RelayError::FileError {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;
        }

        info!("Downloading {} to {}", asset.name, path.display());
        match self.config.backend {
            FetchBackend::Curl => self.fetch_with_curl(asset, &url, &path).await?,
            FetchBackend::Http => self.fetch_with_http(asset, &url, &path).await?,
        }

        Ok(path)
    }

    /// Arguments handed to `curl` for one asset
    pub fn curl_args(&self, asset: &Asset, url: &str, path: &Path) -> Vec<String> {
        let max_time = self.config.timeout_ms.div_ceil(1000).max(1);
        let mut args = vec![
            "--fail".to_string(),
            "--silent".to_string(),
            "--show-error".to_string(),
            "--max-time".to_string(),
            max_time.to_string(),
        ];
        if let Some((name, value)) = asset.extra_header {
            args.push("-H".to_string());
            args.push(format!("{}: {}", name, value));
        }
        args.push(url.to_string());
        args.push("-o".to_string());
        args.push(path.display().to_string());
        args
    }

    async fn fetch_with_curl(&self, asset: &Asset, url: &str, path: &Path) -> Result<()> {
        let args = self.curl_args(asset, url, path);
        let command = format!("curl {}", args.join(" "));
        debug!("Running {}", command);

        let status = Command::new("curl")
            .args(&args)
            .status()
            .await
            .map_err(|e| RelayError::SubprocessError {
                command: command.clone(),
                status: e.to_string(),
            })?;

        if !status.success() {
            return Err(RelayError::SubprocessError {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }

    async fn fetch_with_http(&self, asset: &Asset, url: &str, path: &Path) -> Result<()> {
        let mut request = self.client.get(url);
        if let Some((name, value)) = asset.extra_header {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| RelayError::NetworkError {
            message: format!("{}: {}", url, e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::ApiError {
                status: status.as_u16(),
                message: format!("GET {}", url),
            });
        }

        let body = response.bytes().await?;
        tokio::fs::write(path, &body)
            .await
            .map_err(|e| RelayError::FileError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }
}
