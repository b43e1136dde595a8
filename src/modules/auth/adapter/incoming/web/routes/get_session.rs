use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::get_session::SessionStatus;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// Current admin session
///
/// Reports whether a session is active and which capabilities it grants.
#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = "admin",
    responses(
        (status = 200, description = "Session status", body = inline(SuccessResponse<SessionStatus>)),
        (status = 503, description = "Auth service unreachable", body = ErrorResponse),
    )
)]
#[get("/api/admin/session")]
pub async fn get_admin_session_handler(data: web::Data<AppState>) -> impl Responder {
    match data.admin.session.execute().await {
        Ok(status) => ApiResponse::success(status),
        Err(e) => {
            error!(error = %e, "Session lookup failed");
            ApiResponse::service_unavailable("AUTH_UNAVAILABLE", &e.to_string())
        }
    }
}
