//! In-memory implementation of the `FleetStore` trait.
//!
//! The volatile fallback: same observable contract as the Postgres store,
//! same initial fleet, no persistence across restarts. A single mutex guards
//! both collections, so the availability check-and-set in `create_rental` is
//! atomic without any further coordination.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use fleet_core::domain::{Car, NewRental, Rental, RentalChanges, RentalStatus, RentalWithCar};
use fleet_core::ports::{FleetStore, RentalTotals, StoreError};

use crate::seed;

struct Inner {
    cars: BTreeMap<i64, Car>,
    rentals: BTreeMap<i64, Rental>,
    next_rental_id: i64,
}

/// In-memory implementation of the `FleetStore` trait.
pub struct MemoryFleetStore {
    inner: Mutex<Inner>,
}

impl MemoryFleetStore {
    /// Create a store pre-seeded with the initial fleet.
    pub fn new() -> Self {
        let now = Utc::now();
        let cars = seed::initial_fleet()
            .into_iter()
            .enumerate()
            .map(|(index, (make, model, year, daily_rate))| {
                let id = index as i64 + 1;
                (
                    id,
                    Car {
                        id,
                        make: make.to_string(),
                        model: model.to_string(),
                        year: Some(year),
                        daily_rate,
                        available: true,
                        created_at: now,
                    },
                )
            })
            .collect();

        Self {
            inner: Mutex::new(Inner {
                cars,
                rentals: BTreeMap::new(),
                next_rental_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the data is still structurally valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryFleetStore {
    fn default() -> Self {
        Self::new()
    }
}

fn joined(rental: &Rental, cars: &BTreeMap<i64, Car>) -> Result<RentalWithCar, StoreError> {
    let car = cars.get(&rental.car_id).ok_or_else(|| {
        StoreError::Constraint(format!(
            "Rental {} references missing car {}",
            rental.id, rental.car_id
        ))
    })?;
    Ok(RentalWithCar {
        rental: rental.clone(),
        make: car.make.clone(),
        model: car.model.clone(),
        year: car.year,
        daily_rate: car.daily_rate,
    })
}

#[async_trait]
impl FleetStore for MemoryFleetStore {
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError> {
        // BTreeMap iteration is id-ascending already
        Ok(self.lock().cars.values().cloned().collect())
    }

    async fn get_car(&self, id: i64) -> Result<Car, StoreError> {
        self.lock()
            .cars
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Car with ID {id}")))
    }

    async fn list_rentals(&self) -> Result<Vec<RentalWithCar>, StoreError> {
        let inner = self.lock();
        let mut rows = inner
            .rentals
            .values()
            .map(|rental| joined(rental, &inner.cars))
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| {
            b.rental
                .created_at
                .cmp(&a.rental.created_at)
                .then(b.rental.id.cmp(&a.rental.id))
        });
        Ok(rows)
    }

    async fn get_rental(&self, id: i64) -> Result<Rental, StoreError> {
        self.lock()
            .rentals
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Rental with ID {id}")))
    }

    async fn create_rental(&self, rental: NewRental) -> Result<Rental, StoreError> {
        let mut inner = self.lock();

        // Check-and-set under the same lock: concurrent creates for one car
        // cannot both pass.
        let car = inner.cars.get_mut(&rental.car_id).ok_or_else(|| {
            StoreError::NotFound(format!("Car with ID {}", rental.car_id))
        })?;
        if !car.available {
            return Err(StoreError::CarUnavailable(format!(
                "Car with ID {} is already rented",
                rental.car_id
            )));
        }
        car.available = false;

        let id = inner.next_rental_id;
        inner.next_rental_id += 1;
        let now = Utc::now();
        let stored = Rental {
            id,
            car_id: rental.car_id,
            renter_name: rental.renter_name,
            start_date: rental.start_date,
            end_date: rental.end_date,
            total_cost: rental.total_cost,
            status: RentalStatus::Ongoing,
            created_at: now,
            updated_at: now,
        };
        inner.rentals.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_rental(&self, id: i64, changes: RentalChanges) -> Result<Rental, StoreError> {
        let mut inner = self.lock();
        let rental = inner
            .rentals
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Rental with ID {id}")))?;

        if let Some(status) = changes.status {
            rental.status = status;
        }
        if let Some(end_date) = changes.end_date {
            rental.end_date = end_date;
        }
        if let Some(total_cost) = changes.total_cost {
            rental.total_cost = total_cost;
        }
        rental.updated_at = Utc::now();
        Ok(rental.clone())
    }

    async fn delete_rental(&self, id: i64) -> Result<(), StoreError> {
        self.lock()
            .rentals
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Rental with ID {id}")))
    }

    async fn set_car_availability(&self, id: i64, available: bool) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let car = inner
            .cars
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Car with ID {id}")))?;
        car.available = available;
        Ok(())
    }

    async fn rental_totals(&self) -> Result<RentalTotals, StoreError> {
        let inner = self.lock();
        let total_rentals = inner.rentals.len() as i64;
        let active_rentals = inner
            .rentals
            .values()
            .filter(|rental| rental.status == RentalStatus::Ongoing)
            .count() as i64;
        let total_revenue = inner
            .rentals
            .values()
            .filter(|rental| {
                matches!(
                    rental.status,
                    RentalStatus::Ongoing | RentalStatus::Returned
                )
            })
            .map(|rental| rental.total_cost)
            .sum();

        Ok(RentalTotals {
            total_rentals,
            active_rentals,
            total_revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_rental(car_id: i64) -> NewRental {
        NewRental {
            car_id,
            renter_name: "Alice".to_string(),
            start_date: date("2025-01-01"),
            end_date: date("2025-01-03"),
            total_cost: dec!(105.00),
        }
    }

    #[tokio::test]
    async fn seeds_the_initial_fleet() {
        let store = MemoryFleetStore::new();
        let cars = store.list_cars().await.unwrap();

        assert_eq!(cars.len(), 3);
        assert_eq!(
            cars.iter().map(|car| car.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            cars.iter()
                .map(|car| car.daily_rate.to_string())
                .collect::<Vec<_>>(),
            vec!["35.00", "37.50", "30.00"]
        );
        assert!(cars.iter().all(|car| car.available));
    }

    #[tokio::test]
    async fn create_flips_availability_and_gates_the_next_create() {
        let store = MemoryFleetStore::new();

        let rental = store.create_rental(new_rental(1)).await.unwrap();
        assert_eq!(rental.id, 1);
        assert_eq!(rental.status, RentalStatus::Ongoing);
        assert!(!store.get_car(1).await.unwrap().available);

        let err = store.create_rental(new_rental(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::CarUnavailable(_)));

        // Other cars are unaffected
        assert!(store.get_car(2).await.unwrap().available);
    }

    #[tokio::test]
    async fn create_for_unknown_car_is_not_found() {
        let store = MemoryFleetStore::new();
        let err = store.create_rental(new_rental(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn listing_is_most_recent_first_with_car_fields() {
        let store = MemoryFleetStore::new();
        store.create_rental(new_rental(1)).await.unwrap();
        store.create_rental(new_rental(2)).await.unwrap();

        let rows = store.list_rentals().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rental.id, 2);
        assert_eq!(rows[1].rental.id, 1);
        assert_eq!(rows[1].make, "Toyota");
        assert_eq!(rows[1].model, "Corolla");
        assert_eq!(rows[1].daily_rate, dec!(35.00));
        assert_eq!(rows[0].make, "Honda");
    }

    #[tokio::test]
    async fn update_applies_changes_and_stamps_updated_at() {
        let store = MemoryFleetStore::new();
        let created = store.create_rental(new_rental(1)).await.unwrap();

        let updated = store
            .update_rental(
                created.id,
                RentalChanges {
                    status: Some(RentalStatus::Returned),
                    end_date: Some(date("2025-01-05")),
                    total_cost: Some(dec!(175.00)),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, RentalStatus::Returned);
        assert_eq!(updated.end_date, date("2025-01-05"));
        assert_eq!(updated.total_cost, dec!(175.00));
        assert!(updated.updated_at >= created.updated_at);
        // The store itself does not release the car; that is the service's
        // call to make.
        assert!(!store.get_car(1).await.unwrap().available);
    }

    #[tokio::test]
    async fn delete_removes_the_record_only() {
        let store = MemoryFleetStore::new();
        let created = store.create_rental(new_rental(1)).await.unwrap();

        store.delete_rental(created.id).await.unwrap();
        assert!(matches!(
            store.get_rental(created.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_rental(created.id).await,
            Err(StoreError::NotFound(_))
        ));

        // Ids are never reused
        let next = store.create_rental(new_rental(2)).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn totals_exclude_cancelled_revenue_but_count_it() {
        let store = MemoryFleetStore::new();
        let first = store.create_rental(new_rental(1)).await.unwrap();
        let second = store.create_rental(new_rental(2)).await.unwrap();
        store.create_rental(new_rental(3)).await.unwrap();

        store
            .update_rental(
                first.id,
                RentalChanges {
                    status: Some(RentalStatus::Returned),
                    ..RentalChanges::default()
                },
            )
            .await
            .unwrap();
        store
            .update_rental(
                second.id,
                RentalChanges {
                    status: Some(RentalStatus::Cancelled),
                    ..RentalChanges::default()
                },
            )
            .await
            .unwrap();

        let totals = store.rental_totals().await.unwrap();
        assert_eq!(totals.total_rentals, 3);
        assert_eq!(totals.active_rentals, 1);
        // 105.00 returned + 105.00 ongoing; the cancelled one is left out
        assert_eq!(totals.total_revenue, dec!(210.00));
    }
}
