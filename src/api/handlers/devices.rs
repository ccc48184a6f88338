use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    api::models::{DeviceResponse, RegisterDeviceRequest},
    auth::AuthenticatedCaller,
    error::Result,
};

use super::AppState;

/// POST /api/v1/devices
/// Register a new device owned by the authenticated caller
pub async fn register_device(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>)> {
    let now = Utc::now();
    let device = state
        .registry
        .register_device(&request.device_id, &request.device_type, &caller.0, now)
        .await?;

    Ok((StatusCode::CREATED, Json(DeviceResponse { device })))
}

/// GET /api/v1/devices/{device_id}
/// Returns registration info for a device
pub async fn get_device_info(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceResponse>> {
    let device = state.registry.get_device_info(&device_id).await?;

    Ok(Json(DeviceResponse { device }))
}
