use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered device. Rows are written once at registration and never
/// mutated afterwards; there is no deactivation path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub device_id: String,
    pub device_type: String,
    pub owner: String,
    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
}
