use sqlx::{Sqlite, Transaction};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::Device;

#[derive(Debug, Clone)]
pub struct DeviceRepository {
    pool: DbPool,
}

impl DeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Look up a device by id.
    pub async fn find(&self, device_id: &str) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT device_id, device_type, owner, is_active, registered_at
            FROM devices
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    /// Same lookup through an open transaction, so a write operation sees
    /// state consistent with its own commit.
    pub async fn find_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        device_id: &str,
    ) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT device_id, device_type, owner, is_active, registered_at
            FROM devices
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(device)
    }

    /// Insert a new device within an existing transaction.
    pub async fn insert_in_tx(tx: &mut Transaction<'_, Sqlite>, device: &Device) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO devices (device_id, device_type, owner, is_active, registered_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&device.device_id)
        .bind(&device.device_type)
        .bind(&device.owner)
        .bind(device.is_active)
        .bind(device.registered_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Check database connectivity and that the devices table exists.
    pub async fn health_check(&self) -> Result<(bool, bool)> {
        let connected = sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok();

        let table_exists: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'devices'",
        )
        .fetch_optional(&self.pool)
        .await
        .unwrap_or(None);

        Ok((connected, table_exists.is_some()))
    }
}
