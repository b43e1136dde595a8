use async_trait::async_trait;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::multimedia::application::ports::outgoing::device::{AssetReadError, AssetReader};
use crate::shared::config::{self, ConfigError};

/// Reads picked documents out of one upload directory.
///
/// Accepts plain paths and `file://` URIs. Relative paths resolve against the
/// upload directory, and anything resolving outside it (symlinks included) is
/// refused. Percent-escapes in URIs are not decoded.
#[derive(Debug, Clone)]
pub struct FsAssetReader {
    root: PathBuf,
}

impl FsAssetReader {
    pub const DEFAULT_UPLOAD_DIR: &'static str = "uploads";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Env var: `MEDIA_UPLOAD_DIR` (optional, defaults to `uploads`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let root = config::optional::<PathBuf>("MEDIA_UPLOAD_DIR")?
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_UPLOAD_DIR));
        Ok(Self::new(root))
    }

    fn to_path(uri: &str) -> Result<PathBuf, AssetReadError> {
        let path = match uri.split_once("://") {
            None => uri,
            Some(("file", rest)) => rest.strip_prefix("localhost").unwrap_or(rest),
            Some(_) => return Err(AssetReadError::UnsupportedUri(uri.to_string())),
        };
        if path.trim().is_empty() {
            return Err(AssetReadError::UnsupportedUri(uri.to_string()));
        }
        Ok(PathBuf::from(path))
    }

    fn io_error(uri: &str, path: &Path, e: io::Error) -> AssetReadError {
        match e.kind() {
            ErrorKind::NotFound => AssetReadError::NotFound(uri.to_string()),
            _ => AssetReadError::Io(format!("{}: {e}", path.display())),
        }
    }

    /// Canonical path behind `uri`, inside the upload directory.
    async fn resolve(&self, uri: &str) -> Result<PathBuf, AssetReadError> {
        let path = self.root.join(Self::to_path(uri)?);

        let root = tokio::fs::canonicalize(&self.root).await.map_err(|e| {
            AssetReadError::Io(format!("upload directory {}: {e}", self.root.display()))
        })?;
        let resolved = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| Self::io_error(uri, &path, e))?;

        if !resolved.starts_with(&root) {
            tracing::warn!(uri, root = %root.display(), "Refused asset outside upload directory");
            return Err(AssetReadError::OutsideUploadDir(uri.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl AssetReader for FsAssetReader {
    async fn size(&self, uri: &str) -> Result<u64, AssetReadError> {
        let path = self.resolve(uri).await?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| Self::io_error(uri, &path, e))?;
        if !metadata.is_file() {
            return Err(AssetReadError::UnsupportedUri(uri.to_string()));
        }
        Ok(metadata.len())
    }

    async fn read(&self, uri: &str) -> Result<Vec<u8>, AssetReadError> {
        let path = self.resolve(uri).await?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| Self::io_error(uri, &path, e))
    }
}
