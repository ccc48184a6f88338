use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::config::Config;
use crate::error::Result;

pub type DbPool = Pool<Sqlite>;

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create all tables and indexes if they do not exist. Safe to run on
/// every startup.
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            device_id      TEXT PRIMARY KEY,
            device_type    TEXT NOT NULL,
            owner          TEXT NOT NULL,
            is_active      BOOLEAN NOT NULL DEFAULT TRUE,
            registered_at  TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS energy_records (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id     TEXT NOT NULL REFERENCES devices(device_id),
            day_bucket    INTEGER NOT NULL,
            energy_usage  INTEGER NOT NULL,
            data_source   TEXT NOT NULL,
            metadata      TEXT NOT NULL,
            recorded_at   TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_energy_records_device_day
            ON energy_records(device_id, day_bucket)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS monthly_aggregates (
            device_id           TEXT NOT NULL,
            month_bucket        INTEGER NOT NULL,
            total_energy_usage  INTEGER NOT NULL,
            days_recorded       INTEGER NOT NULL,
            PRIMARY KEY (device_id, month_bucket)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            aggregate_type  TEXT NOT NULL,
            aggregate_id    TEXT NOT NULL,
            event_type      TEXT NOT NULL,
            payload         TEXT NOT NULL,
            created_at      TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_aggregate
            ON events(aggregate_id, id)
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
