pub mod mount_library;
pub mod refresh_library;
pub mod upload_asset;
pub mod viewer;

use actix_web::HttpResponse;

use crate::multimedia::application::domain::entities::Bucket;
use crate::shared::api::ApiResponse;

pub use mount_library::mount_library_handler;
pub use refresh_library::refresh_library_handler;
pub use upload_asset::{upload_asset_handler, UploadAssetResponse};
pub use viewer::{close_viewer_handler, open_viewer_handler, OpenViewerRequest};

fn parse_bucket(s: &str) -> Result<Bucket, HttpResponse> {
    s.parse::<Bucket>()
        .map_err(|e| ApiResponse::bad_request("BUCKET_NOT_FOUND", &e.to_string()))
}
