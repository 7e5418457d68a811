use async_trait::async_trait;
use docket_core::storage::checked_index;
use docket_core::{Collection, ContentRecord, RecordStorage, Result};
use tokio::sync::RwLock;

/// Keeps the collection in process memory. Nothing is persisted.
#[derive(Default)]
pub struct InMemoryStorage {
    records: RwLock<Collection>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Collection) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStorage for InMemoryStorage {
    async fn list_all(&self) -> Result<Collection> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, record: ContentRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn replace_at(&self, index: i64, record: ContentRecord) -> Result<()> {
        let mut records = self.records.write().await;
        let position = checked_index(index, records.len())?;
        records[position] = record;
        Ok(())
    }

    async fn remove_at(&self, index: i64) -> Result<()> {
        let mut records = self.records.write().await;
        let position = checked_index(index, records.len())?;
        records.remove(position);
        Ok(())
    }
}
