use actix_web::{get, web, Responder};

use super::parse_bucket;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::application::library::LibraryView;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Open a media screen
///
/// Checks the admin session and lists the bucket in parallel. A failed listing
/// still answers 200 with the previous assets and leaves an error notification.
#[utoipa::path(
    get,
    path = "/api/media/{bucket}",
    tag = "media",
    params(("bucket" = String, Path, description = "`gallery` or `videos`")),
    responses(
        (status = 200, description = "Library view", body = inline(SuccessResponse<LibraryView>)),
        (
            status = 400,
            description = "Unknown bucket",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "BUCKET_NOT_FOUND", "message": "Unknown bucket 'photos'" }
            })
        ),
    )
)]
#[get("/api/media/{bucket}")]
pub async fn mount_library_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match parse_bucket(&path) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let view = data.multimedia.library(bucket).mount().await;
    ApiResponse::success(view)
}
