use actix_web::{get, web, Responder};

use crate::api::schemas::SuccessResponse;
use crate::shared::api::ApiResponse;
use crate::shared::notifications::Notification;
use crate::AppState;

/// Drain pending notifications
///
/// Returns every notification raised since the last call, oldest first, and
/// clears them.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    responses(
        (
            status = 200,
            description = "Pending notifications",
            body = inline(SuccessResponse<Vec<Notification>>),
            example = json!({
                "success": true,
                "data": [{ "level": "success", "message": "Image uploaded successfully" }]
            })
        ),
    )
)]
#[get("/api/notifications")]
pub async fn drain_notifications_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.notifications.drain())
}
