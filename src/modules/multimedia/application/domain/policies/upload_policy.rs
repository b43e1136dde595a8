use crate::multimedia::application::domain::entities::Bucket;
use crate::shared::config::{self, ConfigError};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UploadPolicyViolation {
    #[error("Empty file")]
    EmptyPayload,

    #[error("File is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("'{content_type}' is not accepted in the {bucket} bucket")]
    UnsupportedMediaType {
        content_type: String,
        bucket: Bucket,
    },
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Supabase's free tier caps a single object at 50 MiB.
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

    /// Env var: `MEDIA_MAX_UPLOAD_BYTES` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let max = config::optional::<u64>("MEDIA_MAX_UPLOAD_BYTES")?
            .unwrap_or(Self::DEFAULT_MAX_FILE_SIZE_BYTES);
        Ok(Self::new(max))
    }

    pub fn new(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes,
        }
    }

    /// Largest JSON body the upload route must accept: the base64 form of a
    /// maximum-size payload plus some room for the envelope.
    pub fn max_request_body_bytes(&self) -> usize {
        let encoded = self.max_file_size_bytes.saturating_mul(4) / 3 + 4;
        usize::try_from(encoded.saturating_add(64 * 1024)).unwrap_or(usize::MAX)
    }

    pub fn check(
        &self,
        bucket: Bucket,
        content_type: &str,
        size: u64,
    ) -> Result<(), UploadPolicyViolation> {
        if !content_type.starts_with(bucket.mime_family()) {
            return Err(UploadPolicyViolation::UnsupportedMediaType {
                content_type: content_type.to_string(),
                bucket,
            });
        }
        if size == 0 {
            return Err(UploadPolicyViolation::EmptyPayload);
        }
        if size > self.max_file_size_bytes {
            return Err(UploadPolicyViolation::TooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}
