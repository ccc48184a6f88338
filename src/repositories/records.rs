use sqlx::{Sqlite, Transaction};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{EnergyRecord, NewEnergyRecord};

#[derive(Debug, Clone)]
pub struct EnergyRecordRepository {
    pool: DbPool,
}

impl EnergyRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a reading within an existing transaction. Returns the row id
    /// of the new record.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        record: &NewEnergyRecord,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO energy_records (
                device_id, day_bucket, energy_usage, data_source, metadata, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&record.device_id)
        .bind(record.day_bucket)
        .bind(record.energy_usage)
        .bind(&record.data_source)
        .bind(&record.metadata)
        .bind(record.recorded_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Fetch all readings for a device whose day bucket lies in the
    /// inclusive range, ascending by day then insertion order.
    pub async fn find_by_device_in_range(
        &self,
        device_id: &str,
        from_bucket: i64,
        to_bucket: i64,
    ) -> Result<Vec<EnergyRecord>> {
        let records = sqlx::query_as::<_, EnergyRecord>(
            r#"
            SELECT id, device_id, day_bucket, energy_usage, data_source, metadata, recorded_at
            FROM energy_records
            WHERE device_id = $1
              AND day_bucket >= $2
              AND day_bucket <= $3
            ORDER BY day_bucket ASC, id ASC
            "#,
        )
        .bind(device_id)
        .bind(from_bucket)
        .bind(to_bucket)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Count readings for a device across all buckets.
    pub async fn count_for_device(&self, device_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM energy_records WHERE device_id = $1",
        )
        .bind(device_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
