//! Rental service - orchestrates the rental lifecycle.
//!
//! All mutations go through the [`FleetStore`] port; the service never
//! touches records directly, so the store remains the single source of truth
//! for concurrent readers (listings, metrics).

use std::sync::Arc;

use crate::dates;
use crate::domain::{
    Car, CreateRental, NewRental, Rental, RentalChanges, RentalStatus, RentalWithCar, UpdateRental,
    validate_status,
};
use crate::money;
use crate::ports::FleetStore;
use crate::services::CoreError;

/// Service for rental lifecycle operations.
pub struct RentalService {
    store: Arc<dyn FleetStore>,
}

impl RentalService {
    /// Create a new rental service over a store backend.
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    /// List all cars in the fleet.
    pub async fn cars(&self) -> Result<Vec<Car>, CoreError> {
        self.store.list_cars().await.map_err(CoreError::from)
    }

    /// Create a rental: validate, gate on availability, compute the cost and
    /// persist with status `ongoing`, flipping the car to unavailable.
    pub async fn create(&self, req: CreateRental) -> Result<Rental, CoreError> {
        let (car_id, renter_name, start_date, end_date) = require_fields(&req)?;

        let car = self.store.get_car(car_id).await.map_err(|err| match err {
            crate::ports::StoreError::NotFound(_) => {
                CoreError::NotFound(format!("Car with ID {car_id} not found"))
            }
            other => CoreError::from(other),
        })?;
        if !car.available {
            return Err(CoreError::Conflict("Car is not available".to_string()));
        }

        let days = dates::inclusive_days_str(start_date, end_date);
        if days == 0 {
            return Err(CoreError::Validation("Invalid rental dates".to_string()));
        }
        // Presence was checked above and a zero day count covers unparsable
        // input, so both parses succeed here.
        let (Some(start), Some(end)) = (dates::parse_date(start_date), dates::parse_date(end_date))
        else {
            return Err(CoreError::Validation("Invalid rental dates".to_string()));
        };

        let total_cost = money::total_cost(car.daily_rate, days);

        // The store re-checks availability under its own lock; a concurrent
        // create for the same car loses there and surfaces as a conflict.
        let rental = self
            .store
            .create_rental(NewRental {
                car_id,
                renter_name: renter_name.to_string(),
                start_date: start,
                end_date: end,
                total_cost,
            })
            .await?;
        tracing::info!(rental_id = rental.id, car_id, days, "Rental created");
        Ok(rental)
    }

    /// List all rentals joined with car fields, most recent first.
    pub async fn list(&self) -> Result<Vec<RentalWithCar>, CoreError> {
        self.store.list_rentals().await.map_err(CoreError::from)
    }

    /// Apply a partial update: extend the end date (recomputing the cost) or
    /// move the status along the lifecycle. A rental reaching `returned`
    /// releases its car; `cancelled` leaves the car unavailable.
    pub async fn update(&self, id: i64, req: UpdateRental) -> Result<Rental, CoreError> {
        let rental = self.store.get_rental(id).await.map_err(|err| match err {
            crate::ports::StoreError::NotFound(_) => {
                CoreError::NotFound(format!("Rental with ID {id} not found"))
            }
            other => CoreError::from(other),
        })?;

        let mut changes = RentalChanges::default();

        if let Some(end_str) = req.end_date.as_deref() {
            let Some(end) = dates::parse_date(end_str) else {
                return Err(CoreError::Validation("Invalid rental dates".to_string()));
            };
            let days = dates::inclusive_days(rental.start_date, end);
            if days == 0 {
                return Err(CoreError::Validation("Invalid rental dates".to_string()));
            }
            let car = self.store.get_car(rental.car_id).await?;
            changes.end_date = Some(end);
            changes.total_cost = Some(money::total_cost(car.daily_rate, days));
        }

        if let Some(status_str) = req.status.as_deref() {
            let next = validate_status(status_str)?;
            if rental.status != RentalStatus::Ongoing || next == RentalStatus::Ongoing {
                return Err(CoreError::Validation(format!(
                    "Invalid status transition: {} -> {}",
                    rental.status.as_str(),
                    next.as_str()
                )));
            }
            changes.status = Some(next);
        }

        let updated = self.store.update_rental(id, changes.clone()).await?;

        if changes.status == Some(RentalStatus::Returned) {
            self.store
                .set_car_availability(rental.car_id, true)
                .await?;
            tracing::info!(rental_id = id, car_id = rental.car_id, "Rental returned; car released");
        }

        Ok(updated)
    }

    /// Remove a rental record. Deletion never re-opens car availability,
    /// whatever the deleted rental's status was.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.store.delete_rental(id).await.map_err(|err| match err {
            crate::ports::StoreError::NotFound(_) => {
                CoreError::NotFound(format!("Rental with ID {id} not found"))
            }
            other => CoreError::from(other),
        })
    }
}

fn require_fields(req: &CreateRental) -> Result<(i64, &str, &str, &str), CoreError> {
    fn present(value: Option<&String>) -> Option<&str> {
        value.map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    let car_id = req.car_id;
    let renter_name = present(req.renter_name.as_ref());
    let start_date = present(req.start_date.as_ref());
    let end_date = present(req.end_date.as_ref());

    match (car_id, renter_name, start_date, end_date) {
        (Some(car_id), Some(renter_name), Some(start_date), Some(end_date)) => {
            Ok((car_id, renter_name, start_date, end_date))
        }
        _ => Err(CoreError::Validation(
            "Missing required rental fields".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{RentalTotals, StoreError};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Single-car stub store; enough surface for the validation paths the
    /// service owns. Lifecycle coverage lives with the real backends.
    struct StubStore {
        car: Car,
        created: Mutex<Vec<NewRental>>,
    }

    impl StubStore {
        fn with_car(available: bool) -> Self {
            Self {
                car: Car {
                    id: 1,
                    make: "Toyota".to_string(),
                    model: "Corolla".to_string(),
                    year: Some(2022),
                    daily_rate: dec!(35.00),
                    available,
                    created_at: Utc::now(),
                },
                created: Mutex::new(Vec::new()),
            }
        }

        fn stored_rental(&self, new: &NewRental) -> Rental {
            let now = Utc::now();
            Rental {
                id: 1,
                car_id: new.car_id,
                renter_name: new.renter_name.clone(),
                start_date: new.start_date,
                end_date: new.end_date,
                total_cost: new.total_cost,
                status: RentalStatus::Ongoing,
                created_at: now,
                updated_at: now,
            }
        }
    }

    #[async_trait]
    impl FleetStore for StubStore {
        async fn list_cars(&self) -> Result<Vec<Car>, StoreError> {
            Ok(vec![self.car.clone()])
        }

        async fn get_car(&self, id: i64) -> Result<Car, StoreError> {
            if id == self.car.id {
                Ok(self.car.clone())
            } else {
                Err(StoreError::NotFound(format!("car {id}")))
            }
        }

        async fn list_rentals(&self) -> Result<Vec<RentalWithCar>, StoreError> {
            Ok(Vec::new())
        }

        async fn get_rental(&self, id: i64) -> Result<Rental, StoreError> {
            Err(StoreError::NotFound(format!("rental {id}")))
        }

        async fn create_rental(&self, rental: NewRental) -> Result<Rental, StoreError> {
            if !self.car.available {
                return Err(StoreError::CarUnavailable("car 1".to_string()));
            }
            let stored = self.stored_rental(&rental);
            self.created.lock().unwrap().push(rental);
            Ok(stored)
        }

        async fn update_rental(
            &self,
            id: i64,
            _changes: RentalChanges,
        ) -> Result<Rental, StoreError> {
            Err(StoreError::NotFound(format!("rental {id}")))
        }

        async fn delete_rental(&self, id: i64) -> Result<(), StoreError> {
            Err(StoreError::NotFound(format!("rental {id}")))
        }

        async fn set_car_availability(&self, _id: i64, _available: bool) -> Result<(), StoreError> {
            Ok(())
        }

        async fn rental_totals(&self) -> Result<RentalTotals, StoreError> {
            Ok(RentalTotals {
                total_rentals: 0,
                active_rentals: 0,
                total_revenue: dec!(0),
            })
        }
    }

    fn request(car_id: i64, start: &str, end: &str) -> CreateRental {
        CreateRental {
            car_id: Some(car_id),
            renter_name: Some("Alice".to_string()),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[tokio::test]
    async fn create_computes_cost_from_rate_and_inclusive_days() {
        let service = RentalService::new(Arc::new(StubStore::with_car(true)));

        let rental = service
            .create(request(1, "2025-01-01", "2025-01-03"))
            .await
            .unwrap();

        assert_eq!(rental.total_cost.to_string(), "105.00");
        assert_eq!(rental.status, RentalStatus::Ongoing);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let service = RentalService::new(Arc::new(StubStore::with_car(true)));

        let mut req = request(1, "2025-01-01", "2025-01-03");
        req.renter_name = Some("   ".to_string());
        assert!(matches!(
            service.create(req).await,
            Err(CoreError::Validation(_))
        ));

        let mut req = request(1, "2025-01-01", "2025-01-03");
        req.end_date = None;
        assert!(matches!(
            service.create(req).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_checks_car_before_dates() {
        let service = RentalService::new(Arc::new(StubStore::with_car(true)));

        // Unknown car wins over the bad range: the caller sees 404, not 400.
        let err = service
            .create(request(99, "bogus", "2025-01-03"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_unavailable_car() {
        let service = RentalService::new(Arc::new(StubStore::with_car(false)));

        let err = service
            .create(request(1, "2025-01-01", "2025-01-03"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_rejects_reversed_and_unparsable_ranges() {
        let service = RentalService::new(Arc::new(StubStore::with_car(true)));

        for (start, end) in [("2025-01-05", "2025-01-01"), ("soon", "later")] {
            let err = service.create(request(1, start, end)).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{start}..{end}");
        }
    }

    #[tokio::test]
    async fn update_of_unknown_rental_is_not_found() {
        let service = RentalService::new(Arc::new(StubStore::with_car(true)));

        let err = service
            .update(
                42,
                UpdateRental {
                    status: Some("returned".to_string()),
                    end_date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
