use docket_core::{RecordStorage, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub mod backends;

pub use backends::*;

pub const DEFAULT_DATA_FILE: &str = "data/contents.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    /// A JSON array in a single file
    #[default]
    Json,
    /// Process memory, lost on exit
    Memory,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Json => f.write_str("json"),
            StorageKind::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// Build the record store described by `config`. A JSON store whose file is
/// missing is still returned; its operations fail until the file exists.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn RecordStorage>> {
    let storage: Arc<dyn RecordStorage> = match config.kind {
        StorageKind::Json => {
            if !tokio::fs::try_exists(&config.data_file).await? {
                warn!(
                    "⚠️ Store file {} does not exist, run `docket init` to create it",
                    config.data_file.display()
                );
            }
            Arc::new(JsonFileStorage::new(&config.data_file))
        }
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
    };

    info!("💾 Using {} storage", config.kind);
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageConfig, StorageKind};
}
