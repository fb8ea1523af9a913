//! Store backend implementations for the fleet rental service.
//!
//! Two implementations of the `fleet_core::ports::FleetStore` contract live
//! here: a durable one over Postgres and a volatile in-memory one. The
//! [`factory`] picks between them once at startup; everything above the port
//! is oblivious to the choice.

pub mod config;
pub mod factory;
pub mod memory;
pub mod postgres;
mod seed;
pub mod setup;

// Re-export for convenient access
pub use config::DbConfig;
pub use factory::connect_store;
pub use memory::MemoryFleetStore;
pub use postgres::PostgresFleetStore;
pub use setup::setup_database;
