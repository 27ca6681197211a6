//! Seam between the command dispatcher and the storage backend. The CLI only
//! talks to [`BucketApi`] so tests can drive it with an in-memory fake.

use futures::TryStreamExt;

use crate::storage::{Bucket, BucketClient, BucketTemplate, StorageResult};

#[async_trait::async_trait]
pub trait BucketApi: Send + Sync {
    async fn create_bucket(
        &self,
        project_name: &str,
        template: &BucketTemplate,
    ) -> StorageResult<Bucket>;

    async fn delete_bucket(&self, bucket_name: &str) -> StorageResult<()>;

    /// Buckets in service order, pagination already flattened away.
    async fn list_buckets(&self, project_name: &str) -> StorageResult<Vec<Bucket>>;

    /// Must be called exactly once before the process exits, on success and
    /// failure paths alike.
    async fn release(&self) -> StorageResult<()>;
}

#[async_trait::async_trait]
impl BucketApi for BucketClient {
    async fn create_bucket(
        &self,
        project_name: &str,
        template: &BucketTemplate,
    ) -> StorageResult<Bucket> {
        self.insert(project_name, template).await
    }

    async fn delete_bucket(&self, bucket_name: &str) -> StorageResult<()> {
        self.delete(bucket_name).await
    }

    async fn list_buckets(&self, project_name: &str) -> StorageResult<Vec<Bucket>> {
        self.list(project_name).await.try_collect().await
    }

    async fn release(&self) -> StorageResult<()> {
        // The underlying connection pool is torn down when the reqwest client
        // is dropped, there is nothing to flush here.
        Ok(())
    }
}
