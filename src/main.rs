//!
//! Room booking REST service.
//! Reads configuration from TOML file (~/.config/atrium-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use atrium_booking::application::booking::{start_stale_sweeper_task, BookingService};
use atrium_booking::config::AppConfig;
use atrium_booking::infrastructure::database::migrator::Migrator;
use atrium_booking::infrastructure::DatabaseConfig;
use atrium_booking::shared::shutdown::ShutdownCoordinator;
use atrium_booking::{
    create_api_router, create_event_bus, default_config_path, init_database, AppState,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Atrium Room Booking Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Wiring ─────────────────────────────────────────────────
    let repos: Arc<dyn atrium_booking::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let event_bus = create_event_bus();

    let hours = app_cfg.booking.business_hours();
    info!("Business hours: {}", hours);
    let booking_service = Arc::new(BookingService::new(
        Arc::clone(&repos),
        hours,
        event_bus.clone(),
    ));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout_secs);
    shutdown.start_signal_listener();

    // ── Background tasks ───────────────────────────────────────
    start_stale_sweeper_task(
        Arc::clone(&repos),
        shutdown.signal(),
        app_cfg.booking.sweep_interval_secs,
    );

    // ── HTTP server ────────────────────────────────────────────
    let state = AppState {
        repos,
        booking_service,
        event_bus,
        metrics_handle: prometheus_handle,
    };
    let router = create_api_router(state);

    let addr = app_cfg.server.address();
    info!("🌐 REST API listening on http://{}", addr);
    info!("📖 Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let shutdown_signal = shutdown.signal();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
