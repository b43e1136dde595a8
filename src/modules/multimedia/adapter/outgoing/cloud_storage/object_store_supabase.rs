use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::multimedia::application::{
    domain::entities::Bucket,
    ports::outgoing::cloud_storage::{ObjectStore, ObjectStoreError, StoredObject, UploadOptions},
};
use crate::shared::supabase::{send_json, send_unit, ApiFailure, SessionStore, SupabaseConfig};

/// Supabase creates this marker when a folder is made from the dashboard.
const EMPTY_FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

/// Same value supabase-js sends when the caller gives none.
const UPLOAD_CACHE_CONTROL: &str = "max-age=3600";

fn map_storage_error(failure: ApiFailure) -> ObjectStoreError {
    let m = failure.message.to_lowercase();

    match failure.status {
        None => ObjectStoreError::NetworkInterrupted(failure.message),
        _ if m.contains("bucket not found") => ObjectStoreError::BucketNotFound,
        Some(409) => ObjectStoreError::AlreadyExists,
        _ if m.contains("already exists") || m.contains("duplicate") => {
            ObjectStoreError::AlreadyExists
        }
        Some(413) => ObjectStoreError::PayloadTooLarge,
        _ if m.contains("maximum allowed size") || m.contains("too large") => {
            ObjectStoreError::PayloadTooLarge
        }
        Some(401 | 403) => ObjectStoreError::AccessDenied(failure.message),
        _ if m.contains("row-level security") || m.contains("unauthorized") => {
            ObjectStoreError::AccessDenied(failure.message)
        }
        Some(404) => ObjectStoreError::BucketNotFound,
        Some(_) => ObjectStoreError::Service(failure.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
struct ListEntry {
    name: String,
}

/// Internal seam so tests can drive the adapter without an HTTP server.
#[async_trait]
trait StorageApi: Send + Sync {
    async fn list_page(
        &self,
        bucket: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ListEntry>, ApiFailure>;

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), ApiFailure>;
}

/// Supabase Storage adapter for the `ObjectStore` port.
#[derive(Clone)]
pub struct SupabaseObjectStore {
    api: Arc<dyn StorageApi>,
    config: SupabaseConfig,
}

impl SupabaseObjectStore {
    pub fn new(http: reqwest::Client, config: SupabaseConfig, sessions: SessionStore) -> Self {
        Self {
            api: Arc::new(StorageRestApi {
                http,
                config: config.clone(),
                sessions,
            }),
            config,
        }
    }

    #[cfg(test)]
    fn with_api(api: Arc<dyn StorageApi>, config: SupabaseConfig) -> Self {
        Self { api, config }
    }
}

#[async_trait]
impl ObjectStore for SupabaseObjectStore {
    async fn list(&self, bucket: Bucket) -> Result<Vec<StoredObject>, ObjectStoreError> {
        let limit = self.config.list_page_size();
        let mut objects = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .api
                .list_page(bucket.as_str(), limit, offset)
                .await
                .map_err(|failure| {
                    tracing::error!(%bucket, error = %failure, "Storage list failed");
                    map_storage_error(failure)
                })?;

            let fetched = page.len();
            objects.extend(
                page.into_iter()
                    .filter(|entry| entry.name != EMPTY_FOLDER_PLACEHOLDER)
                    .map(|entry| StoredObject::new(entry.name)),
            );

            if fetched < limit {
                break;
            }
            offset += fetched;
        }

        Ok(objects)
    }

    async fn public_url(&self, bucket: Bucket, name: &str) -> Result<String, ObjectStoreError> {
        Ok(self
            .config
            .endpoint(&["storage", "v1", "object", "public", bucket.as_str(), name])
            .to_string())
    }

    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<(), ObjectStoreError> {
        self.api
            .upload_object(bucket.as_str(), name, bytes, content_type, options.overwrite)
            .await
            .map_err(|failure| {
                tracing::error!(%bucket, object = name, error = %failure, "Storage upload failed");
                map_storage_error(failure)
            })
    }
}

// ============================================================================
// Real Storage REST client (reqwest)
// ============================================================================

struct StorageRestApi {
    http: reqwest::Client,
    config: SupabaseConfig,
    sessions: SessionStore,
}

impl StorageRestApi {
    /// Signed-in requests act as the admin; everything else as the anon role.
    async fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self
            .sessions
            .access_token()
            .await
            .unwrap_or_else(|| self.config.anon_key().to_string());

        request
            .header("apikey", self.config.anon_key())
            .bearer_auth(token)
    }
}

#[async_trait]
impl StorageApi for StorageRestApi {
    async fn list_page(
        &self,
        bucket: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ListEntry>, ApiFailure> {
        let url = self
            .config
            .endpoint(&["storage", "v1", "object", "list", bucket]);
        let body = ListRequest {
            prefix: "",
            limit,
            offset,
            sort_by: SortBy {
                column: "name",
                order: "asc",
            },
        };

        let request = self.authorized(self.http.post(url).json(&body)).await;
        send_json(request).await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), ApiFailure> {
        let url = self.config.endpoint(&["storage", "v1", "object", bucket, name]);
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);

        send_unit(self.authorized(request).await).await
    }
}

// ============================================================================
// Tests
// ============================================================================
