use actix_web::{delete, put, web, Responder};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use super::parse_bucket;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::application::library::{LibraryView, SelectAssetError, ViewerState};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenViewerRequest {
    #[schema(example = "video-1700000000000.mp4")]
    pub storage_key: String,
}

/// Open the full-screen viewer on a listed asset
///
/// Replaces any viewer already open. Videos report autoplay and native controls.
#[utoipa::path(
    put,
    path = "/api/media/{bucket}/viewer",
    tag = "media",
    params(("bucket" = String, Path, description = "`gallery` or `videos`")),
    request_body = OpenViewerRequest,
    responses(
        (status = 200, description = "Viewer opened", body = inline(SuccessResponse<ViewerState>)),
        (status = 400, description = "Unknown bucket", body = ErrorResponse),
        (
            status = 404,
            description = "Asset is not in the current listing",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "ASSET_NOT_LISTED",
                    "message": "'image-1.jpg' is not in the current listing"
                }
            })
        ),
    )
)]
#[put("/api/media/{bucket}/viewer")]
pub async fn open_viewer_handler(
    path: web::Path<String>,
    payload: web::Json<OpenViewerRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match parse_bucket(&path) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match data
        .multimedia
        .library(bucket)
        .select(&payload.storage_key)
        .await
    {
        Ok(viewer) => ApiResponse::success(viewer),
        Err(e @ SelectAssetError::AssetNotListed(_)) => {
            debug!(%bucket, error = %e, "Viewer not opened");
            ApiResponse::not_found("ASSET_NOT_LISTED", &e.to_string())
        }
    }
}

/// Close the viewer
///
/// Closing when nothing is open is not an error.
#[utoipa::path(
    delete,
    path = "/api/media/{bucket}/viewer",
    tag = "media",
    params(("bucket" = String, Path, description = "`gallery` or `videos`")),
    responses(
        (status = 200, description = "Viewer closed", body = inline(SuccessResponse<LibraryView>)),
        (status = 400, description = "Unknown bucket", body = ErrorResponse),
    )
)]
#[delete("/api/media/{bucket}/viewer")]
pub async fn close_viewer_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match parse_bucket(&path) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let library = data.multimedia.library(bucket);

    library.close_viewer().await;
    ApiResponse::success(library.view().await)
}
