use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_admin::{AdminLoginRequest, LoginAdminError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Admin login request from client
#[derive(Deserialize, ToSchema)]
pub struct AdminLoginDto {
    /// Must match the configured admin email
    #[schema(example = "owner@portfolio.dev")]
    pub email: String,

    #[schema(example = "correct-horse-battery-staple")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AdminLoginResponse {
    #[schema(example = "8b7c1f4e-9a55-4c2f-9d1a-0d6b8f1e2a33")]
    user_id: String,

    #[schema(example = "owner@portfolio.dev")]
    email: Option<String>,
}

/// Admin login
///
/// Signs the configured admin account in. The session is kept server-side and
/// unlocks uploads on both media libraries.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = AdminLoginDto,
    responses(
        (status = 200, description = "Signed in", body = inline(SuccessResponse<AdminLoginResponse>)),
        (
            status = 400,
            description = "Malformed request",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "Invalid email format" }
            })
        ),
        (
            status = 401,
            description = "Wrong admin email or password",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INCORRECT_PASSWORD", "message": "Incorrect admin password." }
            })
        ),
        (status = 403, description = "Signed-in account is not the admin", body = ErrorResponse),
        (status = 502, description = "Auth service rejected the request", body = ErrorResponse),
        (status = 503, description = "Auth service unreachable", body = ErrorResponse),
    )
)]
#[post("/api/admin/login")]
pub async fn login_admin_handler(
    req: web::Json<AdminLoginDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match AdminLoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %request.email(), "Admin login attempt");

    match data.admin.login.execute(request).await {
        Ok(user) => {
            info!(user_id = %user.id, "Admin logged in");
            ApiResponse::success(AdminLoginResponse {
                user_id: user.id.to_string(),
                email: user.email,
            })
        }

        Err(err @ LoginAdminError::InvalidAdminEmail) => {
            warn!("Admin login refused: not the admin email");
            ApiResponse::unauthorized("INVALID_ADMIN_EMAIL", &err.to_string())
        }

        Err(err @ LoginAdminError::IncorrectPassword) => {
            warn!("Admin login refused: wrong password");
            ApiResponse::unauthorized("INCORRECT_PASSWORD", &err.to_string())
        }

        Err(err @ LoginAdminError::NotAdmin) => {
            warn!("Admin login refused: account mismatch");
            ApiResponse::forbidden("NOT_ADMIN", &err.to_string())
        }

        Err(LoginAdminError::Rejected(ref msg)) => {
            warn!(reason = %msg, "Admin login rejected by auth service");
            ApiResponse::bad_gateway("AUTH_REJECTED", msg)
        }

        Err(err @ LoginAdminError::Unavailable(_)) => {
            error!(error = %err, "Auth service unavailable");
            ApiResponse::service_unavailable("AUTH_UNAVAILABLE", &err.to_string())
        }
    }
}
