//! Postgres implementation of the `FleetStore` trait.
//!
//! All SQL lives here; the `PgPool` is confined to this module and never
//! exposed through the port signatures.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use fleet_core::domain::{Car, NewRental, Rental, RentalChanges, RentalStatus, RentalWithCar};
use fleet_core::ports::{FleetStore, RentalTotals, StoreError};

const RENTAL_COLUMNS: &str =
    "id, car_id, renter_name, start_date, end_date, total_cost, status, created_at, updated_at";

/// Postgres implementation of the `FleetStore` trait.
pub struct PostgresFleetStore {
    pool: PgPool,
}

impl PostgresFleetStore {
    /// Create a new Postgres store over an initialized pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    make: String,
    model: String,
    year: Option<i32>,
    daily_rate: Decimal,
    available: bool,
    created_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Self {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
            daily_rate: row.daily_rate,
            available: row.available,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i64,
    car_id: i64,
    renter_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = StoreError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let status = RentalStatus::parse(&row.status)
            .ok_or_else(|| StoreError::Storage(format!("Unexpected rental status: {}", row.status)))?;
        Ok(Self {
            id: row.id,
            car_id: row.car_id,
            renter_name: row.renter_name,
            start_date: row.start_date,
            end_date: row.end_date,
            total_cost: row.total_cost,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RentalWithCarRow {
    id: i64,
    car_id: i64,
    renter_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    make: String,
    model: String,
    year: Option<i32>,
    daily_rate: Decimal,
}

impl TryFrom<RentalWithCarRow> for RentalWithCar {
    type Error = StoreError;

    fn try_from(row: RentalWithCarRow) -> Result<Self, Self::Error> {
        let status = RentalStatus::parse(&row.status)
            .ok_or_else(|| StoreError::Storage(format!("Unexpected rental status: {}", row.status)))?;
        Ok(Self {
            rental: Rental {
                id: row.id,
                car_id: row.car_id,
                renter_name: row.renter_name,
                start_date: row.start_date,
                end_date: row.end_date,
                total_cost: row.total_cost,
                status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            make: row.make,
            model: row.model,
            year: row.year,
            daily_rate: row.daily_rate,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total_rentals: i64,
    active_rentals: i64,
    total_revenue: Decimal,
}

#[async_trait]
impl FleetStore for PostgresFleetStore {
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError> {
        let rows: Vec<CarRow> = sqlx::query_as(
            "SELECT id, make, model, year, daily_rate, available, created_at \
             FROM cars ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn get_car(&self, id: i64) -> Result<Car, StoreError> {
        let row: Option<CarRow> = sqlx::query_as(
            "SELECT id, make, model, year, daily_rate, available, created_at \
             FROM cars WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(Car::from)
            .ok_or_else(|| StoreError::NotFound(format!("Car with ID {id}")))
    }

    async fn list_rentals(&self) -> Result<Vec<RentalWithCar>, StoreError> {
        let rows: Vec<RentalWithCarRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.car_id, r.renter_name, r.start_date, r.end_date,
                   r.total_cost, r.status, r.created_at, r.updated_at,
                   c.make, c.model, c.year, c.daily_rate
            FROM rentals r
            JOIN cars c ON c.id = r.car_id
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        rows.into_iter().map(RentalWithCar::try_from).collect()
    }

    async fn get_rental(&self, id: i64) -> Result<Rental, StoreError> {
        let query = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1");
        let row: Option<RentalRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(Rental::try_from)
            .transpose()?
            .ok_or_else(|| StoreError::NotFound(format!("Rental with ID {id}")))
    }

    async fn create_rental(&self, rental: NewRental) -> Result<Rental, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        // Row lock: of two concurrent creates for the same car, the second
        // blocks here and then sees available = FALSE.
        let car: Option<(bool,)> =
            sqlx::query_as("SELECT available FROM cars WHERE id = $1 FOR UPDATE")
                .bind(rental.car_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| StoreError::Storage(e.to_string()))?;

        let Some((available,)) = car else {
            return Err(StoreError::NotFound(format!(
                "Car with ID {}",
                rental.car_id
            )));
        };
        if !available {
            return Err(StoreError::CarUnavailable(format!(
                "Car with ID {} is already rented",
                rental.car_id
            )));
        }

        let query = format!(
            "INSERT INTO rentals (car_id, renter_name, start_date, end_date, total_cost) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {RENTAL_COLUMNS}"
        );
        let row: RentalRow = sqlx::query_as(&query)
            .bind(rental.car_id)
            .bind(&rental.renter_name)
            .bind(rental.start_date)
            .bind(rental.end_date)
            .bind(rental.total_cost)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        sqlx::query("UPDATE cars SET available = FALSE WHERE id = $1")
            .bind(rental.car_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Rental::try_from(row)
    }

    async fn update_rental(&self, id: i64, changes: RentalChanges) -> Result<Rental, StoreError> {
        let query = format!(
            "UPDATE rentals SET \
                 status = COALESCE($2, status), \
                 end_date = COALESCE($3, end_date), \
                 total_cost = COALESCE($4, total_cost), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {RENTAL_COLUMNS}"
        );
        let row: Option<RentalRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(changes.status.map(RentalStatus::as_str))
            .bind(changes.end_date)
            .bind(changes.total_cost)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(Rental::try_from)
            .transpose()?
            .ok_or_else(|| StoreError::NotFound(format!("Rental with ID {id}")))
    }

    async fn delete_rental(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Rental with ID {id}")));
        }
        Ok(())
    }

    async fn set_car_availability(&self, id: i64, available: bool) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE cars SET available = $2 WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Car with ID {id}")));
        }
        Ok(())
    }

    async fn rental_totals(&self) -> Result<RentalTotals, StoreError> {
        let row: TotalsRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS total_rentals,
                   COUNT(*) FILTER (WHERE status = 'ongoing') AS active_rentals,
                   COALESCE(
                       SUM(total_cost) FILTER (WHERE status IN ('ongoing', 'returned')),
                       0::NUMERIC
                   ) AS total_revenue
            FROM rentals
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(RentalTotals {
            total_rentals: row.total_rentals,
            active_rentals: row.active_rentals,
            total_revenue: row.total_revenue,
        })
    }
}
