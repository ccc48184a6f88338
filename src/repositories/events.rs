use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};

use crate::db::DbPool;
use crate::error::Result;
use crate::models::Event;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: DbPool,
}

impl EventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append an event within an existing transaction, so the event and the
    /// state change it describes commit together.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        aggregate_type: &str,
        aggregate_id: &str,
        event_type: &str,
        payload: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO events (aggregate_type, aggregate_id, event_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(aggregate_type)
        .bind(aggregate_id)
        .bind(event_type)
        .bind(payload)
        .bind(created_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(id)
    }

    /// Events for one aggregate in emission order.
    pub async fn find_by_aggregate(&self, aggregate_id: &str) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, aggregate_type, aggregate_id, event_type, payload, created_at
            FROM events
            WHERE aggregate_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
