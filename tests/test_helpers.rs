use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use energy_tracker_api::db::{self, DbPool};
use energy_tracker_api::repositories::{
    DeviceRepository, EnergyRecordRepository, MonthlyAggregateRepository,
};
use energy_tracker_api::services::{DeviceRegistryService, EnergyLedgerService};

/// 2024-03-01 12:00:00 UTC, a fixed base so tests are replayable
pub const BASE_TS: i64 = 1_709_294_400;

/// Creates an in-memory test database with the schema applied. A single
/// connection keeps every query on the same store.
pub async fn create_test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

/// Wires registry and ledger services over one pool, the way main does
pub fn build_services(pool: &DbPool) -> (DeviceRegistryService, EnergyLedgerService) {
    let devices = DeviceRepository::new(pool.clone());
    let records = EnergyRecordRepository::new(pool.clone());
    let aggregates = MonthlyAggregateRepository::new(pool.clone());

    let registry = DeviceRegistryService::new(devices.clone(), pool.clone());
    let ledger = EnergyLedgerService::new(devices, records, aggregates, pool.clone());

    (registry, ledger)
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}
