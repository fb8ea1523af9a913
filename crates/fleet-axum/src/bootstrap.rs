//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the web adapter: the store backend is selected here (durable with a
//! one-time volatile fallback, or volatile outright for tests) and the
//! services are assembled around it.

use std::env;
use std::sync::Arc;

use anyhow::Result;

use fleet_core::ports::FleetStore;
use fleet_core::services::{MetricsService, RentalService};
use fleet_db::{DbConfig, MemoryFleetStore, connect_store};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Store backend selection, made once at startup.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Durable Postgres store; falls back to the in-memory store when the
    /// database is unreachable.
    Postgres(DbConfig),
    /// Volatile in-memory store only (tests, demos).
    Memory,
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Store backend selection.
    pub store: StoreConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Build a config from the environment: `PORT` for the listener and the
    /// `DB_*` variables for the durable backend.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(3000);
        Self {
            port,
            store: StoreConfig::Postgres(DbConfig::from_env()),
            cors: CorsConfig::default(),
        }
    }
}

/// Application context for the Axum adapter: the services handlers call.
pub struct AxumContext {
    /// Rental lifecycle service.
    pub rentals: RentalService,
    /// Metrics aggregator; also owns the request counter.
    pub metrics: MetricsService,
}

/// Bootstrap the services over the configured store backend.
pub async fn bootstrap(config: ServerConfig) -> Result<AxumContext> {
    let store: Arc<dyn FleetStore> = match config.store {
        StoreConfig::Postgres(db_config) => connect_store(&db_config).await,
        StoreConfig::Memory => {
            tracing::info!("Using the in-memory store");
            Arc::new(MemoryFleetStore::new())
        }
    };

    Ok(AxumContext {
        rentals: RentalService::new(store.clone()),
        metrics: MetricsService::new(store),
    })
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(config.clone()).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("fleet server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
