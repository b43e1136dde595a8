pub mod modules;
pub use modules::{auth, multimedia};
mod api;
pub mod health;
pub mod notifications;
pub mod shared;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::SupabaseAuth;
use crate::auth::application::admin_use_cases::AdminUseCases;
use crate::auth::application::domain::policies::admin_policy::AdminPolicy;
use crate::auth::application::use_cases::{
    get_session::GetSessionService, login_admin::LoginAdminService,
    logout_admin::LogoutAdminService,
};
use crate::multimedia::adapter::outgoing::cloud_storage::SupabaseObjectStore;
use crate::multimedia::adapter::outgoing::device::{FsAssetReader, SystemClock};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::library::{MediaLibrary, MediaLibraryDeps};
use crate::multimedia::application::media_use_cases::MultimediaUseCases;
use crate::multimedia::application::ports::incoming::services::{
    ListAssetsService, UploadAssetService,
};
use crate::multimedia::application::ports::outgoing::cloud_storage::ObjectStore;
use crate::shared::api::custom_json_config;
use crate::shared::config;
use crate::shared::notifications::{NotificationLog, Notifier};
use crate::shared::supabase::{SessionStore, SupabaseConfig};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub multimedia: MultimediaUseCases,
    pub admin: AdminUseCases,
    pub notifications: Arc<NotificationLog>,
    pub object_store: Arc<dyn ObjectStore>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    // Load Env. variables
    let supabase = SupabaseConfig::from_env().context("Invalid Supabase configuration")?;
    let admin_policy = AdminPolicy::from_env().context("Invalid admin configuration")?;
    let upload_policy = UploadPolicy::from_env().context("Invalid upload configuration")?;
    let asset_reader = FsAssetReader::from_env().context("Invalid upload configuration")?;
    let host = config::required("HOST")?;
    let port = config::required("PORT")?;

    let server_url = format!("{host}:{port}");
    info!(%server_url, env = %env, "Configuration loaded");

    // Supabase clients share one HTTP client and one session
    let http = supabase
        .http_client()
        .context("Failed to build HTTP client")?;
    let sessions = SessionStore::default();
    let auth = SupabaseAuth::new(http.clone(), supabase.clone(), sessions.clone());
    let object_store = SupabaseObjectStore::new(http, supabase, sessions);

    let notifications = Arc::new(NotificationLog::default());
    let notifier: Arc<dyn Notifier> = notifications.clone();

    // Admin use cases
    let admin = AdminUseCases {
        login: Arc::new(LoginAdminService::new(
            auth.clone(),
            admin_policy,
            Arc::clone(&notifier),
        )),
        logout: Arc::new(LogoutAdminService::new(auth.clone(), Arc::clone(&notifier))),
        session: Arc::new(GetSessionService::new(auth.clone())),
    };

    // Media libraries
    let json_limit = upload_policy.max_request_body_bytes();
    let deps = MediaLibraryDeps {
        list_assets: Arc::new(ListAssetsService::new(object_store.clone(), SystemClock)),
        upload_asset: Arc::new(UploadAssetService::new(
            object_store.clone(),
            asset_reader,
            SystemClock,
            upload_policy,
        )),
        session: Arc::new(auth),
        notifier,
    };
    let multimedia = MultimediaUseCases {
        gallery: Arc::new(MediaLibrary::gallery(deps.clone())),
        videos: Arc::new(MediaLibrary::videos(deps)),
    };

    let state = AppState {
        multimedia,
        admin,
        notifications,
        object_store: Arc::new(object_store),
    };

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(custom_json_config(json_limit))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Admin
    cfg.service(crate::auth::adapter::incoming::web::routes::login_admin_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_admin_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::get_admin_session_handler);
    // Media
    cfg.service(crate::multimedia::adapter::incoming::web::routes::mount_library_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::refresh_library_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::upload_asset_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::open_viewer_handler);
    cfg.service(crate::multimedia::adapter::incoming::web::routes::close_viewer_handler);
    // Notifications
    cfg.service(crate::notifications::drain_notifications_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
