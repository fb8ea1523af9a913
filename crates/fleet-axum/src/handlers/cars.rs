//! Car handlers - fleet listing.

use axum::Json;
use axum::extract::State;

use crate::error::HttpError;
use crate::state::AppState;
use fleet_core::domain::Car;

/// List the fleet, id ascending.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Car>>, HttpError> {
    Ok(Json(state.rentals.cars().await?))
}
