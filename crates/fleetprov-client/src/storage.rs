//! S3-backed object storage.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use fleetprov_core::{ObjectStore, Result};
use tracing::debug;

use crate::sdk::sdk_error;

/// Object storage backed by Amazon S3
#[derive(Debug, Clone)]
pub struct StorageClient {
    inner: Client,
    region: String,
}

impl StorageClient {
    /// Wrap an existing SDK client (useful for testing against a local
    /// endpoint)
    #[must_use]
    pub fn new(inner: Client, region: impl Into<String>) -> Self {
        Self {
            inner,
            region: region.into(),
        }
    }

    /// Build a client from the ambient AWS environment
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_owned()))
            .load()
            .await;
        Self::new(Client::new(&config), region)
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        debug!("ListBuckets");
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| sdk_error("ListBuckets", e))?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_owned))
            .collect())
    }

    async fn create_bucket(&self, name: &str) -> Result<()> {
        debug!(bucket = name, region = %self.region, "CreateBucket");
        let constraint = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
            .build();

        self.inner
            .create_bucket()
            .bucket(name)
            .create_bucket_configuration(constraint)
            .send()
            .await
            .map_err(|e| sdk_error("CreateBucket", e))?;
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        debug!(bucket = name, "DeleteBucket");
        self.inner
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteBucket", e))?;
        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            debug!(bucket, continued = token.is_some(), "ListObjectsV2");
            let response = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListObjectsV2", e))?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_owned)),
            );

            token = response.next_continuation_token().map(str::to_owned);
            if token.is_none() {
                break;
            }
        }

        Ok(keys)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        debug!(bucket, key, "DeleteObject");
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteObject", e))?;
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        debug!(bucket, key, bytes = body.len(), "PutObject");
        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| sdk_error("PutObject", e))?;
        Ok(())
    }
}
