use actix_web::{post, web, Responder};
use tracing::warn;

use super::parse_bucket;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::application::library::LibraryView;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Re-list a media screen
#[utoipa::path(
    post,
    path = "/api/media/{bucket}/refresh",
    tag = "media",
    params(("bucket" = String, Path, description = "`gallery` or `videos`")),
    responses(
        (status = 200, description = "Fresh library view", body = inline(SuccessResponse<LibraryView>)),
        (status = 400, description = "Unknown bucket", body = ErrorResponse),
        (
            status = 502,
            description = "Storage listing failed; the previous list is kept",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "LISTING_FAILED", "message": "Failed to fetch images" }
            })
        ),
    )
)]
#[post("/api/media/{bucket}/refresh")]
pub async fn refresh_library_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let bucket = match parse_bucket(&path) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let library = data.multimedia.library(bucket);

    match library.refresh().await {
        Ok(()) => ApiResponse::success(library.view().await),
        Err(e) => {
            warn!(%bucket, error = %e, "Refresh failed");
            ApiResponse::bad_gateway("LISTING_FAILED", bucket.fetch_failed_message())
        }
    }
}
