use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One usage reading. Records are append-only; several readings may share
/// a `(device_id, day_bucket)` pair and are kept individually in
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnergyRecord {
    pub id: i64,
    pub device_id: String,
    pub day_bucket: i64,
    pub energy_usage: i64,
    pub data_source: String,
    /// Opaque payload supplied by the caller. Not parsed or validated.
    pub metadata: String,
    pub recorded_at: DateTime<Utc>,
}

/// Insert form of a reading, before the row id is assigned.
#[derive(Debug, Clone)]
pub struct NewEnergyRecord {
    pub device_id: String,
    pub day_bucket: i64,
    pub energy_usage: i64,
    pub data_source: String,
    pub metadata: String,
    pub recorded_at: DateTime<Utc>,
}

/// Running totals for one device over one 30-day window.
///
/// `days_recorded` counts inserted records, not distinct calendar days; a
/// day with two readings contributes two.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlyAggregate {
    pub device_id: String,
    pub month_bucket: i64,
    pub total_energy_usage: i64,
    pub days_recorded: i64,
}

impl MonthlyAggregate {
    /// Zero-valued aggregate for a window with no recorded usage.
    pub fn empty(device_id: &str, month_bucket: i64) -> Self {
        Self {
            device_id: device_id.to_string(),
            month_bucket,
            total_energy_usage: 0,
            days_recorded: 0,
        }
    }
}

/// Event log entry, written in the same transaction as the state change
/// it describes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageQueryParams {
    pub from: Option<i64>,
    pub to: Option<i64>,
}
