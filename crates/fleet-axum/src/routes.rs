//! Route definitions and router construction.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::dto::Health;
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without the `/api` prefix (for nesting under /api).
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(handlers::cars::list))
        .route(
            "/rentals",
            get(handlers::rentals::list).post(handlers::rentals::create),
        )
        .route(
            "/rentals/{id}",
            axum::routing::put(handlers::rentals::update).delete(handlers::rentals::remove),
        )
}

/// Create the main Axum router with all routes.
///
/// The request-counting middleware wraps the WHOLE router, so every inbound
/// request is counted once regardless of route match or outcome.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::snapshot))
        .nest("/api", api_routes().layer(cors))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Count one inbound request, then hand off to the router.
async fn count_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.metrics.record_request();
    next.run(req).await
}

/// Health check endpoint.
async fn health_check() -> Json<Health> {
    Json(Health {
        status: "OK",
        timestamp: Utc::now(),
    })
}
