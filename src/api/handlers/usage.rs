use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    api::models::{EnergyDataResponse, RecordUsageRequest, RecordUsageResponse},
    auth::AuthenticatedCaller,
    error::{AppError, Result},
    models::{MonthlyAggregate, UsageQueryParams},
};

use super::AppState;

/// POST /api/v1/devices/{device_id}/usage
/// Append a usage reading for a device owned by the authenticated caller
pub async fn record_usage(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Extension(caller): Extension<AuthenticatedCaller>,
    Json(request): Json<RecordUsageRequest>,
) -> Result<(StatusCode, Json<RecordUsageResponse>)> {
    let now = Utc::now();
    let record_id = state
        .ledger
        .record_energy_usage(
            &device_id,
            request.energy_usage,
            &request.data_source,
            &request.metadata,
            &caller.0,
            now,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RecordUsageResponse { record_id })))
}

/// GET /api/v1/devices/{device_id}/usage?from=&to=
/// Readings whose day bucket falls in the inclusive range
pub async fn get_device_energy_data(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<UsageQueryParams>,
) -> Result<Json<EnergyDataResponse>> {
    let from = params
        .from
        .ok_or_else(|| AppError::Validation("from is required".to_string()))?;
    let to = params
        .to
        .ok_or_else(|| AppError::Validation("to is required".to_string()))?;

    let data = state
        .ledger
        .get_device_energy_data(&device_id, from, to)
        .await?;

    Ok(Json(EnergyDataResponse {
        count: data.len(),
        data,
    }))
}

/// GET /api/v1/devices/{device_id}/aggregates/{month_bucket}
/// Monthly aggregate for an exact window key; zero-valued when absent
pub async fn get_monthly_aggregate(
    State(state): State<AppState>,
    Path((device_id, month_bucket)): Path<(String, i64)>,
) -> Result<Json<MonthlyAggregate>> {
    let aggregate = state
        .ledger
        .get_monthly_aggregate(&device_id, month_bucket)
        .await?;

    Ok(Json(aggregate))
}
