use super::error::StorageResult;
use super::store::ObjectStore;
use crate::config::settings::StagingConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Which side of the pipeline a bucket / staging directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketRole {
    Raw,
    Processed,
}

/// Moves files between the remote buckets and the local staging directories.
#[derive(Clone)]
pub struct StorageGateway {
    objects: Arc<dyn ObjectStore>,
    raw_bucket: String,
    processed_bucket: String,
    staging: StagingConfig,
}

impl StorageGateway {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        raw_bucket: impl Into<String>,
        processed_bucket: impl Into<String>,
        staging: StagingConfig,
    ) -> Self {
        Self {
            objects: store,
            raw_bucket: raw_bucket.into(),
            processed_bucket: processed_bucket.into(),
            staging,
        }
    }

    pub fn bucket(&self, role: BucketRole) -> &str {
        match role {
            BucketRole::Raw => &self.raw_bucket,
            BucketRole::Processed => &self.processed_bucket,
        }
    }

    pub fn staging_dir(&self, role: BucketRole) -> &Path {
        match role {
            BucketRole::Raw => &self.staging.raw_dir,
            BucketRole::Processed => &self.staging.processed_dir,
        }
    }

    pub fn local_path(&self, role: BucketRole, key: &str) -> PathBuf {
        self.staging_dir(role).join(key)
    }

    /// Creates both staging directories. Called once at startup.
    pub async fn ensure_staging_dirs(&self) -> StorageResult<()> {
        Self::ensure_directory(&self.staging.raw_dir).await?;
        Self::ensure_directory(&self.staging.processed_dir).await
    }

    pub async fn ensure_directory(path: &Path) -> StorageResult<()> {
        fs::create_dir_all(path).await?;
        debug!("Directory ready at {}", path.display());
        Ok(())
    }

    pub async fn exists(&self, role: BucketRole, key: &str) -> StorageResult<bool> {
        self.objects.object_exists(self.bucket(role), key).await
    }

    /// Downloads `key` into the staging directory for `role`, named after the key.
    pub async fn fetch(&self, role: BucketRole, key: &str) -> StorageResult<PathBuf> {
        let bucket = self.bucket(role);
        let data = self.objects.get_object(bucket, key).await?;

        let path = self.local_path(role, key);
        fs::write(&path, &data).await?;

        info!(
            "⬇️ Downloaded {}/{} to {} ({} bytes)",
            bucket,
            key,
            path.display(),
            data.len()
        );
        Ok(path)
    }

    /// Uploads a local file under `key` and makes it publicly readable.
    pub async fn store(&self, role: BucketRole, local_path: &Path, key: &str) -> StorageResult<()> {
        let bucket = self.bucket(role);
        let data = fs::read(local_path).await?;
        let size = data.len();
        let content_type = mime_guess::from_path(key).first_or_octet_stream();

        self.objects
            .put_object(bucket, key, data.into(), content_type.essence_str())
            .await?;
        self.objects.make_public(bucket, key).await?;

        info!(
            "⬆️ Uploaded {} to {}/{} ({} bytes, public)",
            local_path.display(),
            bucket,
            key,
            size
        );
        Ok(())
    }

    /// Removes a local file. A missing file is not an error.
    pub async fn delete_local(&self, path: &Path) -> StorageResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                info!("🗑️ Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("File not found at {}, skipping deletion", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::error::StorageError;
    use crate::infrastructure::storage::memory::MemoryObjectStore;
    use tempfile::TempDir;

    fn gateway(root: &TempDir, store: Arc<MemoryObjectStore>) -> StorageGateway {
        StorageGateway::new(
            store,
            "raw",
            "processed",
            StagingConfig {
                raw_dir: root.path().join("raw-videos"),
                processed_dir: root.path().join("processed-videos"),
            },
        )
    }

    #[tokio::test]
    async fn ensure_directory_is_idempotent() {
        let root = TempDir::new().unwrap();
        let gw = gateway(&root, Arc::new(MemoryObjectStore::new()));

        gw.ensure_staging_dirs().await.unwrap();
        gw.ensure_staging_dirs().await.unwrap();

        assert!(root.path().join("raw-videos").is_dir());
        assert!(root.path().join("processed-videos").is_dir());
    }

    #[tokio::test]
    async fn delete_local_ignores_missing_file() {
        let root = TempDir::new().unwrap();
        let gw = gateway(&root, Arc::new(MemoryObjectStore::new()));

        let path = root.path().join("never-created.mp4");
        gw.delete_local(&path).await.unwrap();
        gw.delete_local(&path).await.unwrap();
    }

    #[tokio::test]
    async fn delete_local_removes_existing_file() {
        let root = TempDir::new().unwrap();
        let gw = gateway(&root, Arc::new(MemoryObjectStore::new()));

        let path = root.path().join("clip.mp4");
        std::fs::write(&path, b"data").unwrap();
        gw.delete_local(&path).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_local_reports_real_filesystem_errors() {
        let root = TempDir::new().unwrap();
        let gw = gateway(&root, Arc::new(MemoryObjectStore::new()));

        // remove_file on a directory fails with something other than NotFound
        let err = gw.delete_local(root.path()).await.unwrap_err();
        assert!(matches!(err, StorageError::LocalIo(_)));
    }

    #[tokio::test]
    async fn fetch_writes_object_into_raw_staging_dir() {
        let root = TempDir::new().unwrap();
        let store = Arc::new(MemoryObjectStore::new());
        store.insert("raw", "clip1.mp4", &b"raw-bytes"[..]);
        let gw = gateway(&root, store);
        gw.ensure_staging_dirs().await.unwrap();

        let path = gw.fetch(BucketRole::Raw, "clip1.mp4").await.unwrap();

        assert_eq!(path, root.path().join("raw-videos").join("clip1.mp4"));
        assert_eq!(std::fs::read(&path).unwrap(), b"raw-bytes");
    }

    #[tokio::test]
    async fn fetch_missing_object_is_remote_error() {
        let root = TempDir::new().unwrap();
        let gw = gateway(&root, Arc::new(MemoryObjectStore::new()));
        gw.ensure_staging_dirs().await.unwrap();

        let err = gw.fetch(BucketRole::Raw, "ghost.mp4").await.unwrap_err();

        assert!(matches!(err, StorageError::Remote(_)));
        assert!(!root.path().join("raw-videos").join("ghost.mp4").exists());
    }

    #[tokio::test]
    async fn store_uploads_and_marks_public() {
        let root = TempDir::new().unwrap();
        let store = Arc::new(MemoryObjectStore::new());
        let gw = gateway(&root, store.clone());
        gw.ensure_staging_dirs().await.unwrap();

        let path = gw.local_path(BucketRole::Processed, "processed-clip1.mp4");
        std::fs::write(&path, b"small").unwrap();

        gw.store(BucketRole::Processed, &path, "processed-clip1.mp4")
            .await
            .unwrap();

        let object = store.object("processed", "processed-clip1.mp4").unwrap();
        assert_eq!(&object.body[..], b"small");
        assert_eq!(object.content_type, "video/mp4");
        assert!(object.public);
    }

    #[tokio::test]
    async fn exists_checks_the_role_bucket() {
        let root = TempDir::new().unwrap();
        let store = Arc::new(MemoryObjectStore::new());
        store.insert("raw", "clip1.mp4", &b"x"[..]);
        let gw = gateway(&root, store);

        assert!(gw.exists(BucketRole::Raw, "clip1.mp4").await.unwrap());
        assert!(!gw.exists(BucketRole::Processed, "clip1.mp4").await.unwrap());
    }
}
