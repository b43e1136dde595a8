use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The two storage buckets. A library only ever lists and uploads into its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Gallery,
    Videos,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown bucket '{0}'")]
pub struct UnknownBucket(pub String);

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Gallery, Bucket::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Gallery => "gallery",
            Bucket::Videos => "videos",
        }
    }

    /// First part of every generated storage key.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Bucket::Gallery => "image",
            Bucket::Videos => "video",
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            Bucket::Gallery => "jpg",
            Bucket::Videos => "mp4",
        }
    }

    pub fn default_content_type(&self) -> &'static str {
        match self {
            Bucket::Gallery => "image/jpeg",
            Bucket::Videos => "video/mp4",
        }
    }

    /// Content types accepted for upload start with this prefix.
    pub fn mime_family(&self) -> &'static str {
        match self {
            Bucket::Gallery => "image/",
            Bucket::Videos => "video/",
        }
    }

    /// Image URLs get a `t=<millis>` parameter so clients never show a stale copy.
    pub fn cache_busted(&self) -> bool {
        matches!(self, Bucket::Gallery)
    }

    /// Only videos are shown with a title.
    pub fn has_display_title(&self) -> bool {
        matches!(self, Bucket::Videos)
    }

    pub fn fetch_failed_message(&self) -> &'static str {
        match self {
            Bucket::Gallery => "Failed to fetch images",
            Bucket::Videos => "Failed to fetch videos",
        }
    }

    pub fn upload_succeeded_message(&self) -> &'static str {
        match self {
            Bucket::Gallery => "Image uploaded successfully",
            Bucket::Videos => "Video uploaded successfully",
        }
    }

    pub fn upload_failed_message(&self, reason: &dyn fmt::Display) -> String {
        match self {
            Bucket::Gallery => "Upload failed".to_string(),
            Bucket::Videos => format!("Upload failed: {reason}"),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gallery" => Ok(Bucket::Gallery),
            "videos" => Ok(Bucket::Videos),
            other => Err(UnknownBucket(other.to_string())),
        }
    }
}

/// Object name inside a bucket, e.g. `image-1700000000000.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// `<prefix>-<millis>.<extension>`. Uniqueness rests on the timestamp alone.
    pub fn generate(bucket: Bucket, epoch_millis: i64, extension: &str) -> Self {
        Self(format!(
            "{}-{}.{}",
            bucket.key_prefix(),
            epoch_millis,
            extension
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key without its trailing extension (`video-1.mp4` -> `video-1`).
    pub fn display_title(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((head, ext)) if !head.is_empty() && !ext.is_empty() && !ext.contains('/') => {
                head
            }
            _ => &self.0,
        }
    }
}

impl From<String> for StorageKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StorageKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One displayable entry of a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaAsset {
    pub bucket: Bucket,
    #[schema(value_type = String, example = "video-1700000000000.mp4")]
    pub storage_key: StorageKey,
    #[schema(example = "https://xyz.supabase.co/storage/v1/object/public/videos/video-1700000000000.mp4")]
    pub public_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "video-1700000000000")]
    pub display_title: Option<String>,
}

impl MediaAsset {
    pub fn new(bucket: Bucket, storage_key: StorageKey, public_url: String) -> Self {
        let display_title = bucket
            .has_display_title()
            .then(|| storage_key.display_title().to_string());

        Self {
            bucket,
            storage_key,
            public_url,
            display_title,
        }
    }
}

/// Appends `t=<stamp>` to `url`, respecting an existing query string.
pub fn cache_busted_url(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={stamp}")
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let ext = match mime {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "video/mp4" => "mp4",
        "video/quicktime" => "mov",
        "video/webm" => "webm",
        "video/x-matroska" => "mkv",
        "video/x-msvideo" => "avi",
        "video/3gpp" => "3gp",
        _ => return None,
    };
    Some(ext)
}

fn extension_from_file_name(name: &str) -> Option<String> {
    let (stem, ext) = name.trim().rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Lowercased essence of a MIME type, without parameters.
pub fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Known MIME type first, then the picked file's extension, then the bucket default.
pub fn resolve_extension(bucket: Bucket, mime: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(ext) = mime.map(normalize_mime).as_deref().and_then(extension_for_mime) {
        return ext.to_string();
    }
    file_name
        .and_then(extension_from_file_name)
        .unwrap_or_else(|| bucket.default_extension().to_string())
}

/// The reported MIME type, or the bucket default when none was reported.
pub fn resolve_content_type(bucket: Bucket, mime: Option<&str>) -> String {
    mime.map(normalize_mime)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| bucket.default_content_type().to_string())
}
