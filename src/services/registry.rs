use chrono::{DateTime, Utc};
use serde_json::json;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::Device;
use crate::repositories::{DeviceRepository, EventRepository};

/// Owns device identity and ownership. A device id is registered at most
/// once for the registry's lifetime; rows are never mutated or deleted.
#[derive(Debug, Clone)]
pub struct DeviceRegistryService {
    repository: DeviceRepository,
    pool: DbPool,
}

impl DeviceRegistryService {
    pub fn new(repository: DeviceRepository, pool: DbPool) -> Self {
        Self { repository, pool }
    }

    /// Register a new device owned by `caller`. The duplicate check, the
    /// insert and the registration event commit as one transaction; a
    /// failed registration leaves no trace.
    pub async fn register_device(
        &self,
        device_id: &str,
        device_type: &str,
        caller: &str,
        now: DateTime<Utc>,
    ) -> Result<Device> {
        if device_id.trim().is_empty() {
            return Err(AppError::Validation(
                "device_id must not be empty".to_string(),
            ));
        }
        if device_type.trim().is_empty() {
            return Err(AppError::Validation(
                "device_type must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        if DeviceRepository::find_in_tx(&mut tx, device_id).await?.is_some() {
            return Err(AppError::AlreadyRegistered(format!(
                "Device {} already registered",
                device_id
            )));
        }

        let device = Device {
            device_id: device_id.to_string(),
            device_type: device_type.to_string(),
            owner: caller.to_string(),
            is_active: true,
            registered_at: now,
        };
        DeviceRepository::insert_in_tx(&mut tx, &device).await?;

        let payload = serde_json::to_string(&json!({
            "device_id": device.device_id,
            "device_type": device.device_type,
            "owner": device.owner,
        }))?;
        EventRepository::insert_in_tx(
            &mut tx,
            "device",
            device_id,
            "device_registered",
            &payload,
            now,
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Registered device {} for owner {}", device_id, caller);
        Ok(device)
    }

    /// Fetch a device by id.
    pub async fn get_device_info(&self, device_id: &str) -> Result<Device> {
        self.repository
            .find(device_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", device_id)))
    }

    /// Fail unless `caller` owns the device. Distinguishes an unknown
    /// device from a foreign one.
    pub async fn assert_owner(&self, device_id: &str, caller: &str) -> Result<Device> {
        let device = self.get_device_info(device_id).await?;
        if device.owner != caller {
            return Err(AppError::NotOwner(format!(
                "Caller is not the owner of device {}",
                device_id
            )));
        }
        Ok(device)
    }
}
