//! Local filesystem implementation of ObjectStore
//!
//! Provides a directory-based object store for development and tests.
//! Object bytes live under `objects/<key>`; the native storage class of each
//! object is kept in a sibling file under `classes/<key>`.

use super::{ObjectMetadata, ObjectStore, ProviderDescriptor};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use strata_core::{CoreError, CoreResult};

const OBJECTS_DIR: &str = "objects";
const CLASSES_DIR: &str = "classes";

/// Local filesystem object store
///
/// # Example
///
/// ```rust,no_run
/// use strata_storage::object_store::{LocalObjectStore, ObjectStore, ProviderDescriptor};
/// use strata_core::Tier;
/// use bytes::Bytes;
///
/// #[tokio::main]
/// async fn main() -> strata_core::CoreResult<()> {
///     let store = LocalObjectStore::new(ProviderDescriptor::new("local", "disk"), "./data").await?;
///
///     store.put("reports/2024/q1.csv", Bytes::from("a,b"), Tier::Hot.storage_class()).await?;
///     println!("{:?}", store.list_all().await?);
///
///     Ok(())
/// }
/// ```
pub struct LocalObjectStore {
    descriptor: ProviderDescriptor,
    base_dir: PathBuf,
}

impl LocalObjectStore {
    /// Create a new local object store
    ///
    /// Creates the base directory layout if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IoError` if directory creation fails
    pub async fn new(descriptor: ProviderDescriptor, base_dir: impl AsRef<Path>) -> CoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(base_dir.join(OBJECTS_DIR)).await?;
        tokio::fs::create_dir_all(base_dir.join(CLASSES_DIR)).await?;
        Ok(Self {
            descriptor,
            base_dir,
        })
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(OBJECTS_DIR).join(key)
    }

    fn class_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(CLASSES_DIR).join(key)
    }

    fn path_to_key(&self, path: &Path) -> Option<String> {
        path.strip_prefix(self.base_dir.join(OBJECTS_DIR))
            .ok()
            .and_then(|p| p.to_str())
            .map(|s| s.replace(std::path::MAIN_SEPARATOR, "/"))
    }

    fn map_not_found(key: &str, e: std::io::Error) -> CoreError {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::not_found("object", key)
        } else {
            CoreError::from(e)
        }
    }

    async fn write_file(path: &Path, data: &[u8]) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    /// Recursively list all files under a directory
    fn list_recursive<'a>(
        &'a self,
        dir: &'a Path,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = CoreResult<Vec<PathBuf>>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut results = Vec::new();

            let mut read_dir = tokio::fs::read_dir(dir).await?;
            while let Some(entry) = read_dir.next_entry().await? {
                let path = entry.path();
                let metadata = entry.metadata().await?;

                if metadata.is_file() {
                    results.push(path);
                } else if metadata.is_dir() {
                    let mut sub_results = self.list_recursive(&path).await?;
                    results.append(&mut sub_results);
                }
            }

            Ok(results)
        })
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn put(&self, key: &str, data: Bytes, storage_class: &str) -> CoreResult<()> {
        if key.is_empty() {
            return Err(CoreError::ValidationError(
                "Key cannot be empty".to_string(),
            ));
        }

        Self::write_file(&self.object_path(key), &data).await?;
        Self::write_file(&self.class_path(key), storage_class.as_bytes()).await
    }

    async fn get(&self, key: &str) -> CoreResult<Bytes> {
        let data = tokio::fs::read(self.object_path(key))
            .await
            .map_err(|e| Self::map_not_found(key, e))?;

        Ok(Bytes::from(data))
    }

    async fn head(&self, key: &str) -> CoreResult<ObjectMetadata> {
        let metadata = tokio::fs::metadata(self.object_path(key))
            .await
            .map_err(|e| Self::map_not_found(key, e))?;

        let storage_class = tokio::fs::read_to_string(self.class_path(key))
            .await
            .ok()
            .map(|class| class.trim().to_string())
            .filter(|class| !class.is_empty());

        let last_modified = metadata
            .modified()
            .ok()
            .and_then(|t| {
                t.duration_since(UNIX_EPOCH)
                    .ok()
                    .and_then(|d| DateTime::from_timestamp(d.as_secs() as i64, 0))
            })
            .unwrap_or_else(Utc::now);

        Ok(ObjectMetadata {
            key: key.to_string(),
            size_bytes: metadata.len(),
            last_modified,
            storage_class,
            etag: None,
        })
    }

    async fn change_class(&self, key: &str, storage_class: &str) -> CoreResult<()> {
        if !tokio::fs::try_exists(self.object_path(key))
            .await
            .unwrap_or(false)
        {
            return Err(CoreError::not_found("object", key));
        }

        Self::write_file(&self.class_path(key), storage_class.as_bytes()).await
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        for path in [self.object_path(key), self.class_path(key)] {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tokio::fs::remove_file(&path).await?;
            }
        }

        // Idempotent - no error if file doesn't exist
        Ok(())
    }

    async fn list_all(&self) -> CoreResult<Vec<String>> {
        let root = self.base_dir.join(OBJECTS_DIR);
        let files = self.list_recursive(&root).await?;

        let mut keys: Vec<String> = files
            .iter()
            .filter_map(|path| self.path_to_key(path))
            .collect();
        keys.sort();

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Tier;
    use tempfile::TempDir;

    async fn create_store() -> (LocalObjectStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(ProviderDescriptor::new("local", "disk"), temp_dir.path())
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (store, _temp) = create_store().await;

        store
            .put("test.txt", Bytes::from("Hello, World!"), Tier::Hot.storage_class())
            .await
            .unwrap();

        let data = store.get("test.txt").await.unwrap();
        assert_eq!(data, Bytes::from("Hello, World!"));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let (store, _temp) = create_store().await;

        let err = store.get("nonexistent.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_head_and_change_class() {
        let (store, _temp) = create_store().await;

        store
            .put("logs/app.log", Bytes::from("line"), Tier::Hot.storage_class())
            .await
            .unwrap();
        assert_eq!(store.head("logs/app.log").await.unwrap().tier(), Tier::Hot);

        store
            .change_class("logs/app.log", Tier::Archive.storage_class())
            .await
            .unwrap();

        let metadata = store.head("logs/app.log").await.unwrap();
        assert_eq!(metadata.tier(), Tier::Archive);
        assert_eq!(metadata.size_bytes, 4);
        assert_eq!(store.get("logs/app.log").await.unwrap(), Bytes::from("line"));
    }

    #[tokio::test]
    async fn test_change_class_missing_object() {
        let (store, _temp) = create_store().await;

        let err = store.change_class("ghost", Tier::Cold.storage_class()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let (store, _temp) = create_store().await;

        store.put("a.bin", Bytes::from("a"), Tier::Hot.storage_class()).await.unwrap();
        store.delete("a.bin").await.unwrap();
        store.delete("a.bin").await.unwrap();

        assert!(store.head("a.bin").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_all_nested_sorted() {
        let (store, _temp) = create_store().await;

        for key in ["b.txt", "nested/deep/c.txt", "a.txt"] {
            store.put(key, Bytes::from("x"), Tier::Hot.storage_class()).await.unwrap();
        }

        let keys = store.list_all().await.unwrap();
        assert_eq!(keys, vec!["a.txt", "b.txt", "nested/deep/c.txt"]);
    }

    #[tokio::test]
    async fn test_missing_class_file_reads_as_hot() {
        let (store, temp) = create_store().await;

        store.put("a.bin", Bytes::from("a"), Tier::Cold.storage_class()).await.unwrap();
        tokio::fs::remove_file(temp.path().join(CLASSES_DIR).join("a.bin"))
            .await
            .unwrap();

        let metadata = store.head("a.bin").await.unwrap();
        assert!(metadata.storage_class.is_none());
        assert_eq!(metadata.tier(), Tier::Hot);
    }
}
