//! Bucket preparation and manifest upload.

use std::path::Path;
use std::time::Duration;

use fleetprov_core::{ObjectStore, ProvisionError, Result};
use tracing::{debug, info, warn};

/// Retry policy for the bucket reset-and-recreate cycle
#[derive(Debug, Clone)]
pub struct ResetPolicy {
    /// Maximum number of create attempts
    pub max_attempts: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl ResetPolicy {
    /// Calculate backoff for a given attempt
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let backoff = self.initial_backoff.as_millis() as u64 * 2u64.pow(attempt);
        let max = self.max_backoff.as_millis() as u64;
        Duration::from_millis(backoff.min(max))
    }
}

/// Stages the provisioning manifest in object storage
pub struct Stager<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    reset: ResetPolicy,
}

impl<'a, S: ObjectStore + ?Sized> Stager<'a, S> {
    /// A stager with the default reset policy
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            reset: ResetPolicy::default(),
        }
    }

    /// Override the reset policy
    #[must_use]
    pub fn reset_policy(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;
        self
    }

    /// Ensure `bucket` exists and is empty.
    ///
    /// An existing bucket is emptied and deleted before being recreated,
    /// so a rerun always stages into a fresh bucket. Creation retries with
    /// backoff to ride out the provider's deletion lag; exhausting the
    /// attempts yields [`ProvisionError::BucketReset`].
    pub async fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        for attempt in 0..self.reset.max_attempts {
            let existing = self.store.list_buckets().await?;
            debug!(buckets = existing.len(), "listed buckets");

            if !existing.iter().any(|name| name == bucket) {
                info!(bucket, "creating bucket");
                self.store.create_bucket(bucket).await?;
                return Ok(());
            }

            info!(bucket, attempt, "bucket already exists, resetting");
            for key in self.store.list_objects(bucket).await? {
                self.store.delete_object(bucket, &key).await?;
            }
            self.store.delete_bucket(bucket).await?;

            let backoff = self.reset.backoff_for(attempt);
            if !backoff.is_zero() {
                tokio::time::sleep(backoff).await;
            }
        }

        Err(ProvisionError::BucketReset {
            bucket: bucket.to_owned(),
            attempts: self.reset.max_attempts,
        })
    }

    /// Upload the manifest at `path` into `bucket` under `key`.
    ///
    /// Fails with [`ProvisionError::BucketMissing`] when the bucket is
    /// absent rather than skipping the upload.
    pub async fn upload(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let existing = self.store.list_buckets().await?;
        if !existing.iter().any(|name| name == bucket) {
            warn!(bucket, "bucket missing at upload time");
            return Err(ProvisionError::BucketMissing {
                bucket: bucket.to_owned(),
            });
        }

        let body = tokio::fs::read(path).await?;
        info!(bucket, key, bytes = body.len(), "uploading manifest");
        self.store.put_object(bucket, key, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use async_trait::async_trait;

    fn immediate_reset() -> ResetPolicy {
        ResetPolicy {
            max_attempts: 3,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn creates_the_bucket_when_absent() {
        let store = MemoryStore::default();
        Stager::new(&store)
            .reset_policy(immediate_reset())
            .ensure_bucket("fleet-staging")
            .await
            .unwrap();
        assert_eq!(store.bucket_names(), vec!["fleet-staging"]);
    }

    #[tokio::test]
    async fn resets_an_existing_bucket_to_empty() {
        let store = MemoryStore::with_bucket("fleet-staging");
        store
            .put_object("fleet-staging", "stale.json", b"old".to_vec())
            .await
            .unwrap();

        Stager::new(&store)
            .reset_policy(immediate_reset())
            .ensure_bucket("fleet-staging")
            .await
            .unwrap();

        assert_eq!(store.bucket_names(), vec!["fleet-staging"]);
        assert!(store.list_objects("fleet-staging").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_bucket_is_idempotent() {
        let store = MemoryStore::with_bucket("fleet-staging");
        let stager = Stager::new(&store).reset_policy(immediate_reset());

        stager.ensure_bucket("fleet-staging").await.unwrap();
        stager.ensure_bucket("fleet-staging").await.unwrap();

        assert_eq!(store.bucket_names(), vec!["fleet-staging"]);
        assert!(store.list_objects("fleet-staging").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn gives_up_when_the_bucket_keeps_reappearing() {
        // Deletion lag: the bucket stays visible no matter how often it is
        // deleted.
        struct StickyStore(MemoryStore);

        #[async_trait]
        impl ObjectStore for StickyStore {
            async fn list_buckets(&self) -> Result<Vec<String>> {
                self.0.list_buckets().await
            }
            async fn create_bucket(&self, name: &str) -> Result<()> {
                self.0.create_bucket(name).await
            }
            async fn delete_bucket(&self, _name: &str) -> Result<()> {
                Ok(())
            }
            async fn list_objects(&self, bucket: &str) -> Result<Vec<String>> {
                self.0.list_objects(bucket).await
            }
            async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
                self.0.delete_object(bucket, key).await
            }
            async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
                self.0.put_object(bucket, key, body).await
            }
        }

        let store = StickyStore(MemoryStore::with_bucket("fleet-staging"));
        let result = Stager::new(&store)
            .reset_policy(immediate_reset())
            .ensure_bucket("fleet-staging")
            .await;

        assert!(matches!(
            result,
            Err(ProvisionError::BucketReset { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn upload_stores_the_manifest_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");
        std::fs::write(&path, "{\"ThingName\":\"MOTO_0\"}\n").unwrap();

        let store = MemoryStore::with_bucket("fleet-staging");
        Stager::new(&store)
            .upload("fleet-staging", "provisioning-data.json", &path)
            .await
            .unwrap();

        assert_eq!(
            store.object("fleet-staging", "provisioning-data.json"),
            Some(b"{\"ThingName\":\"MOTO_0\"}\n".to_vec())
        );
    }

    #[tokio::test]
    async fn upload_against_a_missing_bucket_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");
        std::fs::write(&path, "{}\n").unwrap();

        let store = MemoryStore::default();
        let result = Stager::new(&store)
            .upload("fleet-staging", "provisioning-data.json", &path)
            .await;

        assert!(matches!(
            result,
            Err(ProvisionError::BucketMissing { bucket }) if bucket == "fleet-staging"
        ));
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = ResetPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(2),
        };
        assert_eq!(policy.backoff_for(0), Duration::from_millis(500));
        assert_eq!(policy.backoff_for(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(2));
    }
}
