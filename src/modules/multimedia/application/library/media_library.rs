use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::auth::application::{domain::entities::Capability, ports::outgoing::SessionOracle};
use crate::multimedia::application::{
    domain::entities::{Bucket, MediaAsset, StorageKey},
    ports::{
        incoming::use_cases::{
            ListAssetsError, ListAssetsUseCase, UploadAssetError, UploadAssetUseCase,
            UploadOutcome,
        },
        outgoing::device::MediaPicker,
    },
};
use crate::shared::notifications::{Notification, Notifier};

/// Everything a library needs, handed in at construction.
#[derive(Clone)]
pub struct MediaLibraryDeps {
    pub list_assets: Arc<dyn ListAssetsUseCase + Send + Sync>,
    pub upload_asset: Arc<dyn UploadAssetUseCase + Send + Sync>,
    pub session: Arc<dyn SessionOracle + Send + Sync>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LibraryUploadError {
    #[error("Uploading requires an active admin session")]
    NotPermitted,

    #[error(transparent)]
    Upload(#[from] UploadAssetError),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SelectAssetError {
    #[error("'{0}' is not in the current listing")]
    AssetNotListed(String),
}

/// The asset currently shown full-screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ViewerState {
    pub asset: MediaAsset,
    /// Videos start playing as soon as the viewer opens.
    pub autoplay: bool,
    pub native_controls: bool,
}

impl ViewerState {
    fn for_asset(asset: MediaAsset) -> Self {
        let is_video = asset.bucket == Bucket::Videos;
        Self {
            asset,
            autoplay: is_video,
            native_controls: is_video,
        }
    }
}

/// Snapshot of one library screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LibraryView {
    pub bucket: Bucket,
    pub assets: Vec<MediaAsset>,
    pub can_upload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ViewerState>,
}

#[derive(Default)]
struct LibraryState {
    assets: Vec<MediaAsset>,
    applied_generation: u64,
    can_upload: bool,
    selected: Option<StorageKey>,
}

impl LibraryState {
    fn asset(&self, key: &str) -> Option<&MediaAsset> {
        self.assets.iter().find(|a| a.storage_key.as_str() == key)
    }
}

/// One media screen (gallery or videos): the listed assets, whether uploads
/// are offered, and the open viewer.
pub struct MediaLibrary {
    bucket: Bucket,
    deps: MediaLibraryDeps,
    generation: AtomicU64,
    state: RwLock<LibraryState>,
}

impl MediaLibrary {
    pub fn new(bucket: Bucket, deps: MediaLibraryDeps) -> Self {
        Self {
            bucket,
            deps,
            generation: AtomicU64::new(0),
            state: RwLock::new(LibraryState::default()),
        }
    }

    pub fn gallery(deps: MediaLibraryDeps) -> Self {
        Self::new(Bucket::Gallery, deps)
    }

    pub fn videos(deps: MediaLibraryDeps) -> Self {
        Self::new(Bucket::Videos, deps)
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Screen mount: session check and listing run side by side.
    pub async fn mount(&self) -> LibraryView {
        let (_, listed) = tokio::join!(self.refresh_admin(), self.refresh());
        if let Err(err) = listed {
            tracing::warn!(bucket = %self.bucket, error = %err, "Mount listing failed");
        }
        self.view().await
    }

    /// Re-reads the session and records whether uploads are offered.
    pub async fn refresh_admin(&self) -> bool {
        let can_upload = match self.deps.session.current_user().await {
            Ok(user) => user.is_some_and(|u| u.grants(Capability::UploadMedia)),
            Err(err) => {
                tracing::warn!(bucket = %self.bucket, error = %err, "Session check failed");
                false
            }
        };
        self.state.write().await.can_upload = can_upload;
        can_upload
    }

    /// Replaces the listed assets with a fresh listing.
    ///
    /// On failure the previous list stays and an error notification is raised.
    /// A listing that finishes after a newer one was applied is dropped.
    pub async fn refresh(&self) -> Result<(), ListAssetsError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let assets = match self.deps.list_assets.execute(self.bucket).await {
            Ok(assets) => assets,
            Err(err) => {
                tracing::error!(bucket = %self.bucket, error = %err, "Listing failed");
                self.deps
                    .notifier
                    .notify(Notification::error(self.bucket.fetch_failed_message()));
                return Err(err);
            }
        };

        let mut state = self.state.write().await;
        if ticket <= state.applied_generation {
            tracing::debug!(
                bucket = %self.bucket,
                ticket,
                applied = state.applied_generation,
                "Discarding stale listing"
            );
            return Ok(());
        }

        state.assets = assets;
        state.applied_generation = ticket;
        if let Some(key) = state.selected.clone() {
            if state.asset(key.as_str()).is_none() {
                state.selected = None;
            }
        }
        Ok(())
    }

    /// Admin-gated upload. The session is checked again first; without it no
    /// picker is opened and nothing is written.
    pub async fn upload(&self, picker: &dyn MediaPicker) -> Result<UploadOutcome, LibraryUploadError> {
        if !self.refresh_admin().await {
            tracing::warn!(bucket = %self.bucket, "Upload refused: no admin session");
            return Err(LibraryUploadError::NotPermitted);
        }

        match self.deps.upload_asset.execute(self.bucket, picker).await {
            Ok(UploadOutcome::Cancelled) => Ok(UploadOutcome::Cancelled),
            Ok(outcome) => {
                self.deps
                    .notifier
                    .notify(Notification::success(self.bucket.upload_succeeded_message()));
                // A failed refresh has already notified and keeps the old list.
                let _ = self.refresh().await;
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(bucket = %self.bucket, error = %err, "Upload failed");
                self.deps
                    .notifier
                    .notify(Notification::error(self.bucket.upload_failed_message(&err)));
                Err(err.into())
            }
        }
    }

    /// Opens the viewer on a listed asset, replacing any open one.
    pub async fn select(&self, storage_key: &str) -> Result<ViewerState, SelectAssetError> {
        let mut state = self.state.write().await;
        let asset = state
            .asset(storage_key)
            .cloned()
            .ok_or_else(|| SelectAssetError::AssetNotListed(storage_key.to_string()))?;
        state.selected = Some(asset.storage_key.clone());
        Ok(ViewerState::for_asset(asset))
    }

    /// Returns whether a viewer was open.
    pub async fn close_viewer(&self) -> bool {
        self.state.write().await.selected.take().is_some()
    }

    pub async fn view(&self) -> LibraryView {
        let state = self.state.read().await;
        let selected = state
            .selected
            .as_ref()
            .and_then(|key| state.asset(key.as_str()))
            .cloned()
            .map(ViewerState::for_asset);

        LibraryView {
            bucket: self.bucket,
            assets: state.assets.clone(),
            can_upload: state.can_upload,
            selected,
        }
    }
}
