use async_trait::async_trait;

use crate::{
    errors::RemoteError,
    repositories::supabase_repo::SupabaseStorage,
    supabase::client::SupabaseClient,
};

/// Bucket-based binary asset store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` at `path`. With `upsert` an existing object is replaced,
    /// otherwise a clash is an error.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str, upsert: bool) -> Result<(), RemoteError>;

    fn public_url(&self, path: &str) -> String;
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        SupabaseStorage { client, bucket: bucket.into() }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str, upsert: bool) -> Result<(), RemoteError> {
        let request = self
            .client
            .http()
            .post(self.client.storage_object_url(&self.bucket, path))
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);

        let response = self.client.authorize(request, true).send().await?;
        SupabaseClient::check_status(response).await
    }

    fn public_url(&self, path: &str) -> String {
        self.client.public_object_url(&self.bucket, path)
    }
}
