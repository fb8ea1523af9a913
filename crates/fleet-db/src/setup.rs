//! Database setup and initialization.
//!
//! This module provides [`setup_database`] for connecting to Postgres and
//! ensuring the schema and the first-run seed exist. The factory calls this
//! once at startup; a failure here triggers the in-memory fallback.

use std::time::Duration;

use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::DbConfig;
use crate::seed;

/// Connect to Postgres and make sure the schema and seed data exist.
///
/// All DDL uses `IF NOT EXISTS`; the seed is applied only when the cars
/// table is empty, so the function is safe to call on every start.
///
/// # Errors
///
/// Returns an error if the server is unreachable within the connection
/// timeout or schema creation fails.
pub async fn setup_database(config: &DbConfig) -> Result<PgPool> {
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.database);
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    seed_cars(&pool).await?;

    Ok(pool)
}

/// Creates the complete database schema.
async fn create_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id BIGSERIAL PRIMARY KEY,
            make TEXT NOT NULL,
            model TEXT NOT NULL,
            year INTEGER,
            daily_rate NUMERIC(10, 2) NOT NULL CHECK (daily_rate >= 0),
            available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Referenced cars must never be deletable out from under a rental
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rentals (
            id BIGSERIAL PRIMARY KEY,
            car_id BIGINT NOT NULL REFERENCES cars(id) ON DELETE RESTRICT,
            renter_name TEXT NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            total_cost NUMERIC(10, 2) NOT NULL,
            status TEXT NOT NULL DEFAULT 'ongoing'
                CHECK (status IN ('ongoing', 'returned', 'cancelled')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rentals_car_id ON rentals(car_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rentals_status ON rentals(status)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Seed the initial fleet on first run.
async fn seed_cars(pool: &PgPool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for (make, model, year, daily_rate) in seed::initial_fleet() {
        sqlx::query("INSERT INTO cars (make, model, year, daily_rate) VALUES ($1, $2, $3, $4)")
            .bind(make)
            .bind(model)
            .bind(year)
            .bind(daily_rate)
            .execute(pool)
            .await?;
    }

    Ok(())
}
