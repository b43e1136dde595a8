use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutAdminResponse {
    #[schema(example = "Logged out successfully")]
    message: String,
}

/// Admin logout
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "Signed out", body = inline(SuccessResponse<LogoutAdminResponse>)),
        (status = 502, description = "Auth service refused the sign-out", body = ErrorResponse),
    )
)]
#[post("/api/admin/logout")]
pub async fn logout_admin_handler(data: web::Data<AppState>) -> impl Responder {
    match data.admin.logout.execute().await {
        Ok(()) => {
            info!("Admin logged out");
            ApiResponse::success(LogoutAdminResponse {
                message: "Logged out successfully".to_string(),
            })
        }
        Err(e) => {
            error!(error = %e, "Admin logout failed");
            ApiResponse::bad_gateway("LOGOUT_FAILED", "Logout failed")
        }
    }
}
