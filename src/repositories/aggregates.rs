use sqlx::{Sqlite, Transaction};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::MonthlyAggregate;

#[derive(Debug, Clone)]
pub struct MonthlyAggregateRepository {
    pool: DbPool,
}

impl MonthlyAggregateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fold one reading into its device/window aggregate, creating the row
    /// on first use. Must run in the same transaction as the record insert
    /// so the ledger and the aggregate never diverge.
    ///
    /// `days_recorded` goes up by one per record, even when a day already
    /// holds a reading.
    pub async fn apply_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        device_id: &str,
        month_bucket: i64,
        energy_usage: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_aggregates (device_id, month_bucket, total_energy_usage, days_recorded)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (device_id, month_bucket) DO UPDATE SET
                total_energy_usage = total_energy_usage + excluded.total_energy_usage,
                days_recorded = days_recorded + 1
            "#,
        )
        .bind(device_id)
        .bind(month_bucket)
        .bind(energy_usage)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Point lookup for one device/window. A window with no recorded usage
    /// yields a zero-valued aggregate, not an error.
    pub async fn find(&self, device_id: &str, month_bucket: i64) -> Result<MonthlyAggregate> {
        let aggregate = sqlx::query_as::<_, MonthlyAggregate>(
            r#"
            SELECT device_id, month_bucket, total_energy_usage, days_recorded
            FROM monthly_aggregates
            WHERE device_id = $1
              AND month_bucket = $2
            "#,
        )
        .bind(device_id)
        .bind(month_bucket)
        .fetch_optional(&self.pool)
        .await?;

        Ok(aggregate.unwrap_or_else(|| MonthlyAggregate::empty(device_id, month_bucket)))
    }
}
