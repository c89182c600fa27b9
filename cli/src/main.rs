//! Parking service CLI
//!
//! Headless server suitable for a systemd unit or a container.
//!
//! ```sh
//! # Default config (~/.config/parking-service/config.toml)
//! parking-cli
//!
//! # Custom config path and port
//! parking-cli --config /etc/parking/config.toml --port 9090
//!
//! # Validate config without starting
//! parking-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use parking::config::AppConfig;
use parking::server::{init_tracing, ServerHandle, ServerOptions};

/// Parking cell management service.
#[derive(Parser, Debug)]
#[command(
    name = "parking-cli",
    version,
    about = "REST API for parking cells and their operators",
    long_about = "Parking service: cells, vehicle entries and usuarios over a JWT-protected \
                  REST API with Swagger UI.\n\n\
                  Default config: ~/.config/parking-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default administrator.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(parking::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) if cli.check => {
            error!("Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database.url");
        config.database.url = url;
    }

    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
