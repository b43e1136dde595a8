use async_trait::async_trait;

use crate::multimedia::application::{
    domain::entities::{Bucket, MediaAsset},
    ports::outgoing::cloud_storage::ObjectStoreError,
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ListAssetsError {
    #[error("Listing failed: {0}")]
    Store(#[from] ObjectStoreError),
}

#[async_trait]
pub trait ListAssetsUseCase: Send + Sync {
    /// Current contents of `bucket` as displayable assets, in store order.
    async fn execute(&self, bucket: Bucket) -> Result<Vec<MediaAsset>, ListAssetsError>;
}
