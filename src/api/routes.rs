use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::middleware::require_jwt_auth;

use super::handlers::{devices, health, usage, AppState};

pub fn create_router(state: AppState) -> Router {
    // State-changing routes sit behind JWT auth; reads are unrestricted
    let write_routes = Router::new()
        .route("/api/v1/devices", post(devices::register_device))
        .route("/api/v1/devices/{device_id}/usage", post(usage::record_usage))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_jwt_auth,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/devices/{device_id}", get(devices::get_device_info))
        .route(
            "/api/v1/devices/{device_id}/usage",
            get(usage::get_device_energy_data),
        )
        .route(
            "/api/v1/devices/{device_id}/aggregates/{month_bucket}",
            get(usage::get_monthly_aggregate),
        )
        .merge(write_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
