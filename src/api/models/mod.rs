use serde::{Deserialize, Serialize};

use crate::models::{Device, EnergyRecord};

#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub device_id: String,
    pub device_type: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub device: Device,
}

#[derive(Debug, Deserialize)]
pub struct RecordUsageRequest {
    pub energy_usage: i64,
    pub data_source: String,
    /// Opaque payload, stored as supplied.
    #[serde(default)]
    pub metadata: String,
}

#[derive(Debug, Serialize)]
pub struct RecordUsageResponse {
    pub record_id: i64,
}

#[derive(Debug, Serialize)]
pub struct EnergyDataResponse {
    pub data: Vec<EnergyRecord>,
    pub count: usize,
}
