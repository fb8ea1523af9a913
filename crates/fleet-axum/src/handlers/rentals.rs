//! Rental handlers - CRUD over rental agreements.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{Deleted, RentalUpdated};
use crate::error::HttpError;
use crate::state::AppState;
use fleet_core::domain::{CreateRental, Rental, RentalWithCar, UpdateRental};

/// List all rentals with their car's descriptive fields, most recent first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RentalWithCar>>, HttpError> {
    Ok(Json(state.rentals.list().await?))
}

/// Create a rental.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRental>,
) -> Result<(StatusCode, Json<Rental>), HttpError> {
    let rental = state.rentals.create(req).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// Update a rental: extend the end date and/or move the status.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRental>,
) -> Result<Json<RentalUpdated>, HttpError> {
    let rental = state.rentals.update(id, req).await?;
    Ok(Json(RentalUpdated::from(rental)))
}

/// Delete a rental.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, HttpError> {
    state.rentals.delete(id).await?;
    Ok(Json(Deleted {
        message: format!("Rental {id} deleted"),
    }))
}
