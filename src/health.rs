use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::multimedia::application::domain::entities::Bucket;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    storage: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Lists the gallery bucket to prove storage is reachable
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    match data.object_store.list(Bucket::Gallery).await {
        Ok(_) => HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            storage: "ok",
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                status: "unhealthy",
                storage: "unhealthy",
            })
        }
    }
}
