//! scamscoped — Scamscope daemon.
//!
//! Serves the [`ScamAnalyzer`](scamscope::ScamAnalyzer) over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scamscope::server::config::{Config, Secrets};
use scamscope::server::{ScamService, build_analyzer};

/// Scamscope daemon — scam message analysis service.
#[derive(Parser)]
#[command(name = "scamscoped")]
#[command(version = scamscope::PKG_VERSION)]
#[command(about = "Scam message analysis daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Override the bind address from the configuration file.
    #[arg(short, long, env = "SCAMSCOPE_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }
    let secrets = Secrets::load()?;

    let analyzer = build_analyzer(&config, &secrets)?;

    let addr: SocketAddr = config.server.address.parse().map_err(|e| {
        scamscope::AnalysisError::Configuration(format!("Invalid address: {e}"))
    })?;

    info!(
        version = scamscope::PKG_VERSION,
        %addr,
        provider = analyzer.provider_name(),
        model = %config.provider.model,
        "scamscoped starting"
    );

    let mut service = ScamService::new(Arc::new(analyzer));
    if let Some(url) = &config.provider.setup_url {
        service = service.with_setup_url(url);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, service.router()).await?;

    Ok(())
}
