use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut response = json!({
        "status": "ok",
        "database": {
            "connected": false,
            "table_exists": false,
        }
    });

    match state.devices.health_check().await {
        Ok((connected, table_exists)) => {
            response["database"]["connected"] = json!(connected);
            response["database"]["table_exists"] = json!(table_exists);

            if !table_exists {
                response["database"]["error"] =
                    json!("Devices table does not exist. Schema initialization has not run.");
            }
        }
        Err(e) => {
            response["database"]["error"] = json!(format!("Database error: {}", e));
        }
    }

    let healthy = response["database"]["connected"].as_bool().unwrap_or(false)
        && response["database"]["table_exists"].as_bool().unwrap_or(false);

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
