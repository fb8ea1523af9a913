//! Store selection at startup.
//!
//! Composition only - no domain logic. The durable/volatile decision is
//! made exactly once per process; nothing above the port ever learns which
//! backend won.

use std::sync::Arc;

use fleet_core::ports::FleetStore;

use crate::config::DbConfig;
use crate::memory::MemoryFleetStore;
use crate::postgres::PostgresFleetStore;
use crate::setup::setup_database;

/// Connect the durable store, falling back to the volatile in-memory store
/// when the database cannot be reached. The fallback is never re-attempted
/// mid-process.
pub async fn connect_store(config: &DbConfig) -> Arc<dyn FleetStore> {
    match setup_database(config).await {
        Ok(pool) => {
            tracing::info!(
                host = %config.host,
                database = %config.database,
                "Connected to Postgres store"
            );
            Arc::new(PostgresFleetStore::new(pool))
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                "Database unreachable at startup; running on the in-memory store \
                 (data will not survive a restart)"
            );
            Arc::new(MemoryFleetStore::new())
        }
    }
}
