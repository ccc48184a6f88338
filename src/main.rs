use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use energy_tracker_api::{
    api::{self, handlers::AppState},
    config::Config,
    db,
    repositories::{DeviceRepository, EnergyRecordRepository, MonthlyAggregateRepository},
    services::{DeviceRegistryService, EnergyLedgerService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,energy_tracker_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting energy-tracker-api");

    // Load configuration
    let config = Config::load()?;

    // Create database pool and ensure the schema exists
    let pool = db::create_pool(&config).await?;
    db::init_schema(&pool).await?;
    tracing::info!("Database ready at {}", config.database.url);

    // Repositories and services
    let devices = DeviceRepository::new(pool.clone());
    let records = EnergyRecordRepository::new(pool.clone());
    let aggregates = MonthlyAggregateRepository::new(pool.clone());

    let registry = DeviceRegistryService::new(devices.clone(), pool.clone());
    let ledger = EnergyLedgerService::new(
        devices.clone(),
        records,
        aggregates,
        pool.clone(),
    );

    let state = AppState {
        registry,
        ledger,
        devices: Arc::new(devices),
        jwt_secret: config.auth.jwt_secret.clone(),
    };
    let app = api::create_router(state);

    let bind_addr = config.api_bind_address();
    tracing::info!("Starting API server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
