use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::parse_bucket;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::adapter::outgoing::device::PresetPicker;
use crate::multimedia::application::domain::policies::UploadPolicyViolation;
use crate::multimedia::application::library::{LibraryUploadError, LibraryView};
use crate::multimedia::application::ports::incoming::use_cases::{UploadAssetError, UploadOutcome};
use crate::multimedia::application::ports::outgoing::cloud_storage::ObjectStoreError;
use crate::multimedia::application::ports::outgoing::device::PickerResult;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadAssetResponse {
    pub outcome: UploadOutcome,
    pub view: LibraryView,
}

fn upload_error_response(err: &LibraryUploadError) -> HttpResponse {
    let message = err.to_string();
    match err {
        LibraryUploadError::NotPermitted => {
            ApiResponse::forbidden("UPLOAD_NOT_PERMITTED", &message)
        }
        LibraryUploadError::Upload(inner) => match inner {
            UploadAssetError::Picker(_) => ApiResponse::bad_request("PICKER_FAILED", &message),
            UploadAssetError::PickerMismatch { .. } => {
                ApiResponse::bad_request("PICKER_MISMATCH", &message)
            }
            UploadAssetError::Read(_) => ApiResponse::bad_request("ASSET_UNREADABLE", &message),
            UploadAssetError::InvalidPayload(_) => {
                ApiResponse::bad_request("INVALID_PAYLOAD", &message)
            }
            UploadAssetError::Policy(UploadPolicyViolation::EmptyPayload) => {
                ApiResponse::bad_request("EMPTY_FILE", &message)
            }
            UploadAssetError::Policy(UploadPolicyViolation::TooLarge { .. })
            | UploadAssetError::Store(ObjectStoreError::PayloadTooLarge) => {
                ApiResponse::payload_too_large("FILE_TOO_LARGE", &message)
            }
            UploadAssetError::Policy(UploadPolicyViolation::UnsupportedMediaType { .. }) => {
                ApiResponse::unsupported_media_type("UNSUPPORTED_MEDIA_TYPE", &message)
            }
            UploadAssetError::Store(_) => ApiResponse::bad_gateway("UPLOAD_FAILED", &message),
        },
    }
}

/// Upload into a media screen (admin only)
///
/// The body carries what the client-side picker returned. A cancelled pick is
/// accepted and changes nothing. On success the bucket is re-listed and the
/// fresh view is returned alongside the new key.
#[utoipa::path(
    post,
    path = "/api/media/{bucket}/upload",
    tag = "media",
    params(("bucket" = String, Path, description = "`gallery` or `videos`")),
    request_body(
        content = PickerResult,
        description = "Picker outcome",
        example = json!({ "kind": "image", "base64": "/9j/4AAQSkZJRg==", "mime_type": "image/jpeg" })
    ),
    responses(
        (status = 201, description = "Asset stored", body = inline(SuccessResponse<UploadAssetResponse>)),
        (status = 200, description = "Picker was cancelled", body = inline(SuccessResponse<UploadAssetResponse>)),
        (
            status = 400,
            description = "Unknown bucket, unreadable payload, or a pick of the wrong kind for the bucket",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "PICKER_MISMATCH",
                    "message": "A document pick is not accepted in the gallery bucket"
                }
            })
        ),
        (
            status = 403,
            description = "No admin session",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "UPLOAD_NOT_PERMITTED",
                    "message": "Uploading requires an active admin session"
                }
            })
        ),
        (status = 413, description = "File exceeds the upload limit", body = ErrorResponse),
        (status = 415, description = "File type does not belong in this bucket", body = ErrorResponse),
        (status = 502, description = "Storage rejected the write", body = ErrorResponse),
    )
)]
#[post("/api/media/{bucket}/upload")]
pub async fn upload_asset_handler(
    path: web::Path<String>,
    payload: web::Json<PickerResult>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match parse_bucket(&path) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let library = data.multimedia.library(bucket);
    let picker = PresetPicker::new(payload.into_inner());

    match library.upload(&picker).await {
        Ok(outcome) => {
            let response = UploadAssetResponse {
                outcome,
                view: library.view().await,
            };
            match &response.outcome {
                UploadOutcome::Uploaded { storage_key } => {
                    info!(%bucket, key = %storage_key, "Upload accepted");
                    ApiResponse::created(response)
                }
                UploadOutcome::Cancelled => ApiResponse::success(response),
            }
        }
        Err(e @ LibraryUploadError::NotPermitted) => {
            warn!(%bucket, "Upload attempted without admin session");
            upload_error_response(&e)
        }
        Err(e) => {
            error!(%bucket, error = %e, "Upload failed");
            upload_error_response(&e)
        }
    }
}
