//! QuestDB signal log over the PostgreSQL wire protocol

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

use crate::db::{SignalFilter, SignalStore, StoreError};
use crate::models::{Direction, SignalLogRecord};

const SELECT_COLUMNS: &str =
    "SELECT timestamp, symbol, current_price, predicted_direction, confidence_score, suggested_strategy, user_id
     FROM signal_logs";

pub struct QuestDatabase {
    client: Client,
}

impl QuestDatabase {
    /// Connect and make sure the `signal_logs` table exists
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(StoreError::Connection)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "QuestDB connection error");
            }
        });

        let db = Self { client };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        // QuestDB syntax: designated TIMESTAMP first, PARTITION BY after
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS signal_logs (
                    timestamp TIMESTAMP,
                    symbol SYMBOL,
                    current_price DOUBLE,
                    predicted_direction SYMBOL,
                    confidence_score DOUBLE,
                    suggested_strategy STRING,
                    user_id STRING
                ) TIMESTAMP(timestamp) PARTITION BY DAY",
                &[],
            )
            .await
            .map_err(|source| StoreError::Query {
                context: "failed to create signal_logs table",
                source,
            })?;
        Ok(())
    }
}

fn record_from_row(row: &Row) -> Result<SignalLogRecord, StoreError> {
    let timestamp_naive: NaiveDateTime = row.get(0);
    let direction: String = row.get(3);

    Ok(SignalLogRecord {
        timestamp: DateTime::from_naive_utc_and_offset(timestamp_naive, Utc),
        symbol: row.get(1),
        current_price: row.get(2),
        predicted_direction: direction.parse::<Direction>().map_err(StoreError::Corrupt)?,
        confidence_score: row.get(4),
        suggested_strategy: row.get(5),
        user_id: row.get(6),
    })
}

#[async_trait]
impl SignalStore for QuestDatabase {
    async fn store(&self, record: &SignalLogRecord) -> Result<(), StoreError> {
        // QuestDB compares timestamps as naive UTC
        let timestamp_naive = record.timestamp.naive_utc();

        self.client
            .execute(
                "INSERT INTO signal_logs (timestamp, symbol, current_price, predicted_direction, confidence_score, suggested_strategy, user_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &timestamp_naive,
                    &record.symbol,
                    &record.current_price,
                    &record.predicted_direction.as_str(),
                    &record.confidence_score,
                    &record.suggested_strategy,
                    &record.user_id,
                ],
            )
            .await
            .map_err(|source| StoreError::Query {
                context: "failed to store signal log",
                source,
            })?;

        Ok(())
    }

    async fn recent(&self, filter: &SignalFilter, limit: usize) -> Result<Vec<SignalLogRecord>, StoreError> {
        let mut conditions = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(symbol) = &filter.symbol {
            params.push(symbol);
            conditions.push(format!("symbol = ${}", params.len()));
        }
        if let Some(user_id) = &filter.user_id {
            params.push(user_id);
            conditions.push(format!("user_id = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "{}{} ORDER BY timestamp DESC LIMIT {}",
            SELECT_COLUMNS, where_clause, limit
        );

        let rows = self
            .client
            .query(&query, &params)
            .await
            .map_err(|source| StoreError::Query {
                context: "failed to query signal logs",
                source,
            })?;

        rows.iter().map(record_from_row).collect()
    }
}
