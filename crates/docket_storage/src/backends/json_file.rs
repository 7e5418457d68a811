use async_trait::async_trait;
use docket_core::storage::checked_index;
use docket_core::{Collection, ContentRecord, RecordStorage, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The collection as a single JSON array on disk. Every operation reads the
/// whole file and mutations overwrite it whole. The mutex serializes
/// operations issued through this handle; other processes writing the same
/// file are not excluded.
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Open the store at `path`, writing an empty collection first if the
    /// file does not exist yet.
    pub async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self::new(path);
        if tokio::fs::try_exists(&storage.path).await? {
            debug!("Store file {} already exists", storage.path.display());
            return Ok(storage);
        }

        if let Some(parent) = storage.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        storage.write(&Vec::new()).await?;
        info!("📁 Created empty store at {}", storage.path.display());
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Collection> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let records: Collection = serde_json::from_str(&data)?;
        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn write(&self, records: &Collection) -> Result<()> {
        let data = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, data).await?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl RecordStorage for JsonFileStorage {
    async fn list_all(&self) -> Result<Collection> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn append(&self, record: ContentRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        records.push(record);
        self.write(&records).await
    }

    async fn replace_at(&self, index: i64, record: ContentRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let position = checked_index(index, records.len())?;
        records[position] = record;
        self.write(&records).await
    }

    async fn remove_at(&self, index: i64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let position = checked_index(index, records.len())?;
        records.remove(position);
        self.write(&records).await
    }
}
