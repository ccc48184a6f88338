use chrono::{DateTime, Utc};
use serde_json::json;

use crate::bucket;
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{EnergyRecord, MonthlyAggregate, NewEnergyRecord};
use crate::repositories::{
    DeviceRepository, EnergyRecordRepository, EventRepository, MonthlyAggregateRepository,
};

/// Append-only usage ledger plus the monthly aggregates derived from it.
/// Every accepted reading updates both inside one transaction, so no
/// reader can observe a record without its aggregate contribution.
#[derive(Debug, Clone)]
pub struct EnergyLedgerService {
    devices: DeviceRepository,
    records: EnergyRecordRepository,
    aggregates: MonthlyAggregateRepository,
    pool: DbPool,
}

impl EnergyLedgerService {
    pub fn new(
        devices: DeviceRepository,
        records: EnergyRecordRepository,
        aggregates: MonthlyAggregateRepository,
        pool: DbPool,
    ) -> Self {
        Self {
            devices,
            records,
            aggregates,
            pool,
        }
    }

    /// Append a reading for a device owned by `caller` and fold it into the
    /// device's 30-day aggregate. Ownership is checked before the amount,
    /// and a failure at any step rolls the whole operation back.
    ///
    /// Returns the id of the new record.
    pub async fn record_energy_usage(
        &self,
        device_id: &str,
        energy_usage: i64,
        data_source: &str,
        metadata: &str,
        caller: &str,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let device = DeviceRepository::find_in_tx(&mut tx, device_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", device_id)))?;
        if device.owner != caller {
            return Err(AppError::NotOwner(format!(
                "Caller is not the owner of device {}",
                device_id
            )));
        }

        if energy_usage < 0 {
            return Err(AppError::InvalidAmount(format!(
                "energy_usage must be non-negative, got {}",
                energy_usage
            )));
        }
        if data_source.trim().is_empty() {
            return Err(AppError::Validation(
                "data_source must not be empty".to_string(),
            ));
        }

        let ts = now.timestamp();
        let day_bucket = bucket::day_bucket(ts);
        let month_bucket = bucket::month_bucket(day_bucket);

        let record = NewEnergyRecord {
            device_id: device_id.to_string(),
            day_bucket,
            energy_usage,
            data_source: data_source.to_string(),
            metadata: metadata.to_string(),
            recorded_at: now,
        };
        let record_id = EnergyRecordRepository::insert_in_tx(&mut tx, &record).await?;

        MonthlyAggregateRepository::apply_in_tx(&mut tx, device_id, month_bucket, energy_usage)
            .await?;

        let payload = serde_json::to_string(&json!({
            "record_id": record_id,
            "day_bucket": day_bucket,
            "energy_usage": energy_usage,
            "data_source": data_source,
        }))?;
        EventRepository::insert_in_tx(&mut tx, "device", device_id, "usage_recorded", &payload, now)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            "Recorded usage {} for device {} in day bucket {}",
            energy_usage,
            device_id,
            day_bucket
        );
        Ok(record_id)
    }

    /// All readings for a registered device whose day bucket falls in the
    /// inclusive range. Both bounds are truncated with the same rule used
    /// at insertion, so any timestamp inside a day selects that whole day.
    /// No readings in range is an empty result, not an error.
    pub async fn get_device_energy_data(
        &self,
        device_id: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<EnergyRecord>> {
        if self.devices.find(device_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Device {} not found",
                device_id
            )));
        }

        let from_bucket = bucket::day_bucket(from);
        let to_bucket = bucket::day_bucket(to);
        if from_bucket > to_bucket {
            return Err(AppError::Validation(
                "from must not be after to".to_string(),
            ));
        }

        self.records
            .find_by_device_in_range(device_id, from_bucket, to_bucket)
            .await
    }

    /// Aggregate for one device/window key. An absent key yields the
    /// zero-valued aggregate; device existence is not checked here, since
    /// no usage recorded is a valid state for any id.
    pub async fn get_monthly_aggregate(
        &self,
        device_id: &str,
        month_bucket: i64,
    ) -> Result<MonthlyAggregate> {
        self.aggregates.find(device_id, month_bucket).await
    }
}
