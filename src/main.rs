//! Parking service binary.
//!
//! Reads `PARKING_CONFIG` or `~/.config/parking-service/config.toml`; a
//! missing or invalid file falls back to the defaults.

use tracing::{error, info};

use parking::config::AppConfig;
use parking::default_config_path;
use parking::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("PARKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
