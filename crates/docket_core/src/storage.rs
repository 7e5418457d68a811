use async_trait::async_trait;
use crate::types::{Collection, ContentRecord};
use crate::{Error, Result};

/// The record store. Records are addressed by their position in the
/// collection; removing one shifts every later position down by one.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Read the whole collection
    async fn list_all(&self) -> Result<Collection>;

    /// Add a record at the end of the collection
    async fn append(&self, record: ContentRecord) -> Result<()>;

    /// Replace the record at `index`
    async fn replace_at(&self, index: i64, record: ContentRecord) -> Result<()>;

    /// Remove the record at `index`
    async fn remove_at(&self, index: i64) -> Result<()>;
}

/// Resolve a caller-supplied index against a collection of `len` records.
pub fn checked_index(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(Error::OutOfRange { index, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_index() {
        assert_eq!(checked_index(0, 3).unwrap(), 0);
        assert_eq!(checked_index(2, 3).unwrap(), 2);
        assert!(matches!(checked_index(3, 3), Err(Error::OutOfRange { index: 3, len: 3 })));
        assert!(matches!(checked_index(-1, 3), Err(Error::OutOfRange { index: -1, .. })));
        assert!(checked_index(0, 0).is_err());
    }
}
