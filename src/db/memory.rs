use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::{SignalFilter, SignalStore, StoreError};
use crate::models::SignalLogRecord;

/// Records kept by `InMemorySignalStore::new`
pub const DEFAULT_MEMORY_CAPACITY: usize = 1_000;

/// Process-local signal log, used when no database is configured and in tests.
///
/// Holds at most `capacity` records; the oldest insert is evicted first.
#[derive(Debug)]
pub struct InMemorySignalStore {
    records: RwLock<VecDeque<SignalLogRecord>>,
    capacity: usize,
}

impl Default for InMemorySignalStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_MEMORY_CAPACITY))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SignalStore for InMemorySignalStore {
    async fn store(&self, record: &SignalLogRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
        Ok(())
    }

    async fn recent(&self, filter: &SignalFilter, limit: usize) -> Result<Vec<SignalLogRecord>, StoreError> {
        let records = self.records.read().await;
        // Later inserts first among equal timestamps
        let mut matching: Vec<SignalLogRecord> = records
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(limit);
        Ok(matching)
    }
}
