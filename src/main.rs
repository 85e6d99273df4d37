use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use txsigner::api;
use txsigner::config::load_config;
use txsigner::crypto::CryptoProvider;
use txsigner::registry::DeviceRegistry;
use txsigner::service::SigningCore;

/// Transaction signing service.
#[derive(Debug, Parser)]
struct Cli {
    /// Path to the config file.
    #[arg(long, default_value = "config/local/config.yaml")]
    config: String,
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new("info"))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load config");
            std::process::exit(1);
        }
    };

    let registry = Arc::new(DeviceRegistry::new());
    let crypto = Arc::new(CryptoProvider::new());
    let core = SigningCore::new(registry, crypto);

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.server_address);
    info!(port = config.server_address, "starting signing service");

    if let Err(err) = api::serve(addr, core, shutdown_signal()).await {
        error!(error = %err, "server exited with error");
        std::process::exit(1);
    }
    info!("server exited properly");
}

/// Waits for `SIGINT` or `SIGTERM`, whichever comes first — the same pair
/// the original service's `gracefulShutdown` caught.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining in-flight requests");
}
