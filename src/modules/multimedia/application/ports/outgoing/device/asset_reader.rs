use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AssetReadError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset URI: {0}")]
    UnsupportedUri(String),

    #[error("Asset is outside the upload directory: {0}")]
    OutsideUploadDir(String),

    #[error("Could not read asset: {0}")]
    Io(String),
}

/// Reads the bytes behind a document-picker URI.
#[async_trait]
pub trait AssetReader: Send + Sync {
    /// Size in bytes, without reading the content.
    async fn size(&self, uri: &str) -> Result<u64, AssetReadError>;

    async fn read(&self, uri: &str) -> Result<Vec<u8>, AssetReadError>;
}
