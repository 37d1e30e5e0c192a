//! Main entry point for the translate-relay CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translate_relay::cli::commands::{self, Commands};

/// Translate Relay - relay server, widget asset fetcher and relay probes
#[derive(Parser, Debug)]
#[command(name = "translate-relay", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("translate_relay={},tower_http={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    match args.command {
        Commands::FetchAssets {
            out,
            backend,
            widget_host,
            timeout_secs,
        } => {
            commands::handle_fetch_assets(out, backend, widget_host, timeout_secs).await?;
        }
        Commands::ProbeTranslate {
            relay,
            preset,
            sl,
            tl,
            text,
        } => {
            commands::handle_probe_translate(relay, preset, sl, tl, text).await?;
        }
        Commands::ProbeLanguage { relay } => {
            commands::handle_probe_language(relay).await?;
        }
        Commands::Serve {
            host,
            port,
            assets_dir,
        } => {
            commands::handle_serve(host, port, assets_dir).await?;
        }
    }

    Ok(())
}
