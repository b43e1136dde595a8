use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::multimedia::application::{
    domain::{
        entities::{resolve_content_type, resolve_extension, Bucket, StorageKey},
        policies::UploadPolicy,
    },
    ports::{
        incoming::use_cases::{UploadAssetError, UploadAssetUseCase, UploadOutcome},
        outgoing::{
            cloud_storage::{ObjectStore, UploadOptions},
            device::{AssetReader, Clock, MediaPicker, PickerFilter, PickerResult},
        },
    },
};

/// Bytes ready to be written, plus what the picker told us about them.
struct PickedPayload {
    bytes: Vec<u8>,
    mime_type: Option<String>,
    file_name: Option<String>,
}

/// Accepts plain base64 as well as a `data:<mime>;base64,<data>` URL.
fn decode_base64(data: &str) -> Result<Vec<u8>, UploadAssetError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| UploadAssetError::InvalidPayload(e.to_string()))
}

pub struct UploadAssetService<S, R, C>
where
    S: ObjectStore,
    R: AssetReader,
    C: Clock,
{
    store: S,
    reader: R,
    clock: C,
    policy: UploadPolicy,
}

impl<S, R, C> UploadAssetService<S, R, C>
where
    S: ObjectStore,
    R: AssetReader,
    C: Clock,
{
    pub fn new(store: S, reader: R, clock: C, policy: UploadPolicy) -> Self {
        Self {
            store,
            reader,
            clock,
            policy,
        }
    }

    /// Document sizes are checked against the policy before any byte is read.
    async fn read_payload(
        &self,
        bucket: Bucket,
        picked: PickerResult,
    ) -> Result<Option<PickedPayload>, UploadAssetError> {
        let payload = match picked {
            PickerResult::Cancelled => return Ok(None),
            PickerResult::Image { base64, mime_type } => PickedPayload {
                bytes: decode_base64(&base64)?,
                mime_type,
                file_name: None,
            },
            PickerResult::Document {
                uri,
                name,
                mime_type,
            } => {
                let content_type = resolve_content_type(bucket, mime_type.as_deref());
                let size = self.reader.size(&uri).await?;
                self.policy.check(bucket, &content_type, size)?;
                PickedPayload {
                    bytes: self.reader.read(&uri).await?,
                    mime_type,
                    file_name: Some(name),
                }
            }
        };
        Ok(Some(payload))
    }
}

fn picker_filter(bucket: Bucket) -> PickerFilter {
    match bucket {
        Bucket::Gallery => PickerFilter::Images,
        Bucket::Videos => PickerFilter::VideoDocuments,
    }
}

#[async_trait]
impl<S, R, C> UploadAssetUseCase for UploadAssetService<S, R, C>
where
    S: ObjectStore,
    R: AssetReader,
    C: Clock,
{
    async fn execute(
        &self,
        bucket: Bucket,
        picker: &dyn MediaPicker,
    ) -> Result<UploadOutcome, UploadAssetError> {
        // 1) Let the user pick; cancelling ends here without side effects.
        let filter = picker_filter(bucket);
        let picked = picker.pick(filter).await?;
        if !picked.fits(filter) {
            tracing::warn!(%bucket, kind = picked.kind(), "Pick does not match the bucket's picker");
            return Err(UploadAssetError::PickerMismatch {
                kind: picked.kind(),
                bucket,
            });
        }
        let Some(payload) = self.read_payload(bucket, picked).await? else {
            tracing::debug!(%bucket, "Upload cancelled in picker");
            return Ok(UploadOutcome::Cancelled);
        };

        // 2) Resolve type and key before touching the store.
        let content_type = resolve_content_type(bucket, payload.mime_type.as_deref());
        let extension = resolve_extension(
            bucket,
            payload.mime_type.as_deref(),
            payload.file_name.as_deref(),
        );
        self.policy
            .check(bucket, &content_type, payload.bytes.len() as u64)?;

        let key = StorageKey::generate(bucket, self.clock.now_millis(), &extension);

        // 3) Write once, never overwriting.
        self.store
            .upload(
                bucket,
                key.as_str(),
                payload.bytes,
                &content_type,
                UploadOptions::default(),
            )
            .await?;

        tracing::info!(%bucket, key = %key, content_type = %content_type, "Asset uploaded");
        Ok(UploadOutcome::Uploaded { storage_key: key })
    }
}
