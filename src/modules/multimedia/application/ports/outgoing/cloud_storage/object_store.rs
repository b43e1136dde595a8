use async_trait::async_trait;
use serde::Deserialize;

use crate::multimedia::application::domain::entities::Bucket;

// ============================================================================
// Domain Types
// ============================================================================

/// A raw listing entry, before any URL resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredObject {
    pub name: String,
}

impl StoredObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Replace an existing object with the same name. Uploads from the
    /// libraries never set this.
    pub overwrite: bool,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("Network problem occurred: {0}")]
    NetworkInterrupted(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("The resource already exists")]
    AlreadyExists,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Service(String),
}

// ============================================================================
// Port Interface
// ============================================================================

/// Bucket-style remote storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every object in `bucket`, in the order the store returns them.
    async fn list(&self, bucket: Bucket) -> Result<Vec<StoredObject>, ObjectStoreError>;

    /// Publicly reachable URL for `name`. Does not check that the object exists.
    async fn public_url(&self, bucket: Bucket, name: &str) -> Result<String, ObjectStoreError>;

    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<(), ObjectStoreError>;
}
