use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    AdminLoginDto, AdminLoginResponse, LogoutAdminResponse,
};
use crate::auth::application::domain::entities::Capability;
use crate::auth::application::use_cases::get_session::SessionStatus;
use crate::multimedia::adapter::incoming::web::routes::{OpenViewerRequest, UploadAssetResponse};
use crate::multimedia::application::domain::entities::{Bucket, MediaAsset};
use crate::multimedia::application::library::{LibraryView, ViewerState};
use crate::multimedia::application::ports::incoming::use_cases::UploadOutcome;
use crate::multimedia::application::ports::outgoing::device::PickerResult;
use crate::shared::notifications::{Notification, NotificationLevel};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Media API",
        version = "1.0.0",
        description = "Gallery and video library of the portfolio app, with admin-gated uploads",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Admin endpoints
        crate::auth::adapter::incoming::web::routes::login_admin::login_admin_handler,
        crate::auth::adapter::incoming::web::routes::logout_admin::logout_admin_handler,
        crate::auth::adapter::incoming::web::routes::get_session::get_admin_session_handler,

        // Media endpoints
        crate::multimedia::adapter::incoming::web::routes::mount_library::mount_library_handler,
        crate::multimedia::adapter::incoming::web::routes::refresh_library::refresh_library_handler,
        crate::multimedia::adapter::incoming::web::routes::upload_asset::upload_asset_handler,
        crate::multimedia::adapter::incoming::web::routes::viewer::open_viewer_handler,
        crate::multimedia::adapter::incoming::web::routes::viewer::close_viewer_handler,

        // Notifications
        crate::notifications::drain_notifications_handler,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ErrorDetail,

            // Admin DTOs
            AdminLoginDto,
            AdminLoginResponse,
            LogoutAdminResponse,
            SessionStatus,
            Capability,

            // Media DTOs
            Bucket,
            MediaAsset,
            LibraryView,
            ViewerState,
            PickerResult,
            UploadOutcome,
            UploadAssetResponse,
            OpenViewerRequest,

            Notification,
            NotificationLevel,
        )
    ),
    tags(
        (name = "admin", description = "Admin session endpoints"),
        (name = "media", description = "Gallery and video library endpoints"),
        (name = "notifications", description = "Transient user-facing messages"),
    )
)]
pub struct ApiDoc;
