use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::multimedia::application::{
    domain::{
        entities::{Bucket, StorageKey},
        policies::UploadPolicyViolation,
    },
    ports::outgoing::{
        cloud_storage::ObjectStoreError,
        device::{AssetReadError, MediaPicker, PickerError},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded {
        #[schema(value_type = String, example = "image-1700000000000.jpg")]
        storage_key: StorageKey,
    },
    Cancelled,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UploadAssetError {
    #[error("{0}")]
    Picker(#[from] PickerError),

    #[error("A {kind} pick is not accepted in the {bucket} bucket")]
    PickerMismatch { kind: &'static str, bucket: Bucket },

    #[error("{0}")]
    Read(#[from] AssetReadError),

    #[error("Invalid image data: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    Policy(#[from] UploadPolicyViolation),

    #[error("{0}")]
    Store(#[from] ObjectStoreError),
}

#[async_trait]
pub trait UploadAssetUseCase: Send + Sync {
    /// Runs the picker and stores whatever it returns under a fresh key.
    ///
    /// A cancelled picker yields `Ok(UploadOutcome::Cancelled)` and touches nothing.
    async fn execute(
        &self,
        bucket: Bucket,
        picker: &dyn MediaPicker,
    ) -> Result<UploadOutcome, UploadAssetError>;
}
