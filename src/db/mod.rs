//! Signal log persistence

pub mod memory;
pub mod questdb;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::SignalLogRecord;

pub use memory::InMemorySignalStore;
pub use questdb::QuestDatabase;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to QuestDB: {0}")]
    Connection(#[source] tokio_postgres::Error),

    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("corrupt signal log row: {0}")]
    Corrupt(String),

    #[error("signal store unavailable")]
    Unavailable,
}

/// Optional constraints on a history query
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    pub symbol: Option<String>,
    pub user_id: Option<String>,
}

impl SignalFilter {
    pub fn matches(&self, record: &SignalLogRecord) -> bool {
        self.symbol.as_deref().map_or(true, |s| s == record.symbol)
            && self
                .user_id
                .as_deref()
                .map_or(true, |u| record.user_id.as_deref() == Some(u))
    }
}

#[async_trait]
pub trait SignalStore: Send + Sync {
    async fn store(&self, record: &SignalLogRecord) -> Result<(), StoreError>;

    /// At most `limit` matching records, newest first
    async fn recent(&self, filter: &SignalFilter, limit: usize) -> Result<Vec<SignalLogRecord>, StoreError>;
}
