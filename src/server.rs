//! Reusable parking service runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database
//! and migrations, default administrator, REST API and graceful shutdown.
//! The `parking-service` binary and the `parking-cli` crate both start the
//! service through it.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{CeldaService, UsuarioService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::interfaces::http::router::{create_api_router, ApiDependencies};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{init_database, SeaOrmRepositoryProvider};

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured administrator when absent (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Handle to a running parking service.
///
/// ```rust,no_run
/// use parking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    pub celda_service: Arc<CeldaService>,
    pub usuario_service: Arc<UsuarioService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is bound to. Differs from the config when it asked for 0.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Install the Prometheus recorder (once per process)
    /// 2. Connect to the database and run migrations
    /// 3. Create the default administrator (if enabled)
    /// 4. Serve the REST API with Swagger UI
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting parking service...");

        let prometheus_handle = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let jwt_config = app_cfg.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let celda_service = Arc::new(CeldaService::new(repos.clone()));
        let usuario_service = Arc::new(UsuarioService::new(repos.clone(), jwt_config.clone()));

        if opts.create_default_admin {
            match usuario_service.ensure_admin(&app_cfg.admin).await {
                Ok(Some(admin)) => {
                    info!(email = %admin.email, "Default administrator created");
                    warn!("Change the default administrator password");
                }
                Ok(None) => {}
                Err(e) => error!("Failed to create default administrator: {}", e),
            }
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(ApiDependencies {
            celda_service: celda_service.clone(),
            usuario_service: usuario_service.clone(),
            db: db.clone(),
            jwt_config,
            prometheus_handle,
            cors_origins: app_cfg.server.cors_origins.clone(),
        });

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        let api_port = local_addr.port();
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            celda_service,
            usuario_service,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API task to stop, then close the database.
    ///
    /// In-flight requests get `shutdown_timeout` seconds once shutdown has
    /// been triggered; after that the task is aborted.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;
        let signal = shutdown.signal();

        tokio::select! {
            result = &mut api_task => match result {
                Ok(()) => info!("REST API server stopped"),
                Err(e) => error!("REST API server task panicked: {}", e),
            },
            _ = signal.wait() => {
                let grace = Duration::from_secs(shutdown.timeout_secs());
                match tokio::time::timeout(grace, &mut api_task).await {
                    Ok(Ok(())) => info!("REST API server stopped"),
                    Ok(Err(e)) => error!("REST API server task panicked: {}", e),
                    Err(_) => {
                        warn!("Graceful shutdown timed out after {:?}, aborting", grace);
                        api_task.abort();
                    }
                }
            }
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Parking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down parking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// The global recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                describe_metrics();
                info!("Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder, /metrics will be empty: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Initialize tracing from the logging section of the config.
///
/// `RUST_LOG` wins over `logging.level` when set. Call once per process,
/// before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".into();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 1;
        config.database.url = "sqlite::memory:".into();
        config.security.jwt_secret = "server-test-secret".into();
        ServerOptions {
            config,
            auto_migrate: true,
            create_default_admin: false,
        }
    }

    #[tokio::test]
    async fn starts_serves_health_and_shuts_down() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.api_port, 0);

        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", handle.api_port))
            .await
            .unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");
        let body: Value = serde_json::from_str(raw.split("\r\n\r\n").nth(1).unwrap()).unwrap();
        assert_eq!(body["status"], "ok");

        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("shutdown finished");
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let mut opts = test_options();
        opts.config.security.jwt_expiration_hours = 0;
        assert!(ServerHandle::start(opts).await.is_err());
    }
}
