use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which picker the library asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerFilter {
    /// Image picker, returning inline base64 data.
    Images,
    /// Document picker restricted to `video/*`, returning a local URI.
    VideoDocuments,
}

/// What the user picked. Cancelling is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickerResult {
    Cancelled,
    Image {
        /// Raw base64 or a `data:<mime>;base64,` URL.
        base64: String,
        #[serde(default)]
        mime_type: Option<String>,
    },
    Document {
        uri: String,
        name: String,
        #[serde(default)]
        mime_type: Option<String>,
    },
}

impl PickerResult {
    pub fn kind(&self) -> &'static str {
        match self {
            PickerResult::Cancelled => "cancelled",
            PickerResult::Image { .. } => "image",
            PickerResult::Document { .. } => "document",
        }
    }

    /// Whether the picker opened with `filter` could have produced this result.
    pub fn fits(&self, filter: PickerFilter) -> bool {
        matches!(
            (self, filter),
            (PickerResult::Cancelled, _)
                | (PickerResult::Image { .. }, PickerFilter::Images)
                | (PickerResult::Document { .. }, PickerFilter::VideoDocuments)
        )
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PickerError {
    #[error("Picker unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn pick(&self, filter: PickerFilter) -> Result<PickerResult, PickerError>;
}
