//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::assets::AssetFetcher;
use crate::core::config::{AssetConfig, FetchBackend, ProbeConfig, RelayConfig, DEFAULT_PORT};
use crate::core::models::AUTO_DETECT;
use crate::probes::{ProbePayload, ProbePreset, RelayProbe};

/// Commands for the translation relay
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the translate widget assets
    FetchAssets {
        /// Assets root, files land under <out>/static/v1/ (default: ASSETS_DIR or assets)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Download backend
        #[arg(long, value_enum, default_value_t = FetchBackend::Curl)]
        backend: FetchBackend,

        /// Host the widget is downloaded from
        #[arg(long)]
        widget_host: Option<String>,

        /// Per asset timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Send one translate request to a relay and print the raw reply
    ProbeTranslate {
        /// Relay base URL (default: RELAY_URL or the public relay)
        #[arg(long)]
        relay: Option<String>,

        /// Built-in payload, ignored when --text is given
        #[arg(long, value_enum, default_value_t = ProbePreset::AutoToEnglish)]
        preset: ProbePreset,

        /// Source language for a custom payload (default: auto)
        #[arg(long, requires = "text")]
        sl: Option<String>,

        /// Target language for a custom payload (default: en)
        #[arg(long, requires = "text")]
        tl: Option<String>,

        /// Sentence to translate, repeat for more
        #[arg(long)]
        text: Vec<String>,
    },

    /// Fetch a relay's language list and print the raw reply
    ProbeLanguage {
        /// Relay base URL (default: RELAY_URL or the public relay)
        #[arg(long)]
        relay: Option<String>,
    },

    /// Start the relay HTTP server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8195)
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory holding the fetched assets (default: ASSETS_DIR or assets)
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },
}

/// Handle asset download command
pub async fn handle_fetch_assets(
    out: Option<PathBuf>,
    backend: FetchBackend,
    widget_host: Option<String>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let mut config = AssetConfig {
        backend,
        timeout_ms: timeout_secs.saturating_mul(1000),
        ..Default::default()
    };
    if let Some(out) = out.or_else(|| std::env::var("ASSETS_DIR").ok().map(PathBuf::from)) {
        config.out_root = out;
    }
    if let Some(host) = widget_host {
        config.widget_host = host;
    }

    info!("Fetching widget assets from {}", config.widget_host);
    info!("Output root: {}", config.out_root.display());
    info!("Backend: {:?}", config.backend);

    let fetcher = AssetFetcher::new(config)?;
    let written = fetcher.fetch_all().await?;

    for path in &written {
        println!("   {}", path.display());
    }
    println!("✅ Fetched {} assets in {:?}", written.len(), start_time.elapsed());

    Ok(())
}

/// Copy a relay reply to `out` byte for byte
fn write_raw<W: Write>(out: &mut W, body: &[u8]) -> std::io::Result<()> {
    out.write_all(body)?;
    out.flush()
}

fn probe_config(relay: Option<String>) -> ProbeConfig {
    let mut config = ProbeConfig::from_env();
    if let Some(relay) = relay {
        config.relay_url = relay;
    }
    config
}

/// Handle translate probe command
pub async fn handle_probe_translate(
    relay: Option<String>,
    preset: ProbePreset,
    sl: Option<String>,
    tl: Option<String>,
    text: Vec<String>,
) -> anyhow::Result<()> {
    let payload = if text.is_empty() {
        preset.payload()
    } else {
        ProbePayload::new(
            sl.unwrap_or_else(|| AUTO_DETECT.to_string()),
            tl.unwrap_or_else(|| "en".to_string()),
            text,
        )
    };

    let probe = RelayProbe::new(probe_config(relay))?;
    let body = probe.translate(&payload).await?;
    write_raw(&mut std::io::stdout().lock(), &body)?;

    Ok(())
}

/// Handle language probe command
pub async fn handle_probe_language(relay: Option<String>) -> anyhow::Result<()> {
    let probe = RelayProbe::new(probe_config(relay))?;
    let body = probe.language().await?;
    write_raw(&mut std::io::stdout().lock(), &body)?;

    Ok(())
}

/// Handle server command
pub async fn handle_serve(
    host: String,
    port: u16,
    assets_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::server::run_server;

    let mut config = RelayConfig::from_env()?;
    if let Some(dir) = assets_dir {
        config.assets_dir = dir;
    }

    info!("Starting relay on {}:{}", host, port);
    println!("🚀 Relay starting on http://{}:{}", host, port);

    run_server(config, host, port).await?;

    Ok(())
}
