use super::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Byte-level access to remote buckets.
///
/// The gateway only ever talks to this trait, so the S3 client can be swapped
/// for an in-memory store in tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Grant anonymous read access to an existing object.
    async fn make_public(&self, bucket: &str, key: &str) -> StorageResult<()>;

    async fn object_exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;
}
