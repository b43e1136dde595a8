use actix_web::web;
use std::sync::Arc;

use crate::auth::application::admin_use_cases::AdminUseCases;
use crate::auth::application::use_cases::{
    get_session::GetSessionUseCase, login_admin::LoginAdminUseCase,
    logout_admin::LogoutAdminUseCase,
};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::library::{MediaLibrary, MediaLibraryDeps};
use crate::multimedia::application::media_use_cases::MultimediaUseCases;
use crate::multimedia::application::ports::incoming::services::{
    ListAssetsService, UploadAssetService,
};
use crate::multimedia::application::ports::outgoing::cloud_storage::ObjectStore;
use crate::shared::notifications::NotificationLog;
use crate::tests::support::fakes::{
    FakeSessionOracle, InMemoryObjectStore, MapAssetReader, StepClock,
};
use crate::tests::support::stubs::*;
use crate::AppState;

const TEST_CLOCK_START: i64 = 1_700_000_000_000;

/// Builds an `AppState` for route tests.
///
/// Libraries run the real services over in-memory fakes; swap the fakes with
/// `with_media_backend`/`with_asset_reader`, or a whole library with
/// `with_gallery`/`with_videos`.
pub struct TestAppStateBuilder {
    login: Arc<dyn LoginAdminUseCase + Send + Sync>,
    logout: Arc<dyn LogoutAdminUseCase + Send + Sync>,
    session: Arc<dyn GetSessionUseCase + Send + Sync>,
    store: InMemoryObjectStore,
    oracle: FakeSessionOracle,
    reader: MapAssetReader,
    gallery: Option<Arc<MediaLibrary>>,
    videos: Option<Arc<MediaLibrary>>,
    notifications: Arc<NotificationLog>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            login: Arc::new(StubLoginAdminUseCase),
            logout: Arc::new(StubLogoutAdminUseCase),
            session: Arc::new(StubGetSessionUseCase),
            store: InMemoryObjectStore::default(),
            oracle: FakeSessionOracle::anonymous(),
            reader: MapAssetReader::default(),
            gallery: None,
            videos: None,
            notifications: Arc::new(NotificationLog::default()),
            object_store: None,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_login_admin(mut self, uc: impl LoginAdminUseCase + Send + Sync + 'static) -> Self {
        self.login = Arc::new(uc);
        self
    }

    pub fn with_logout_admin(
        mut self,
        uc: impl LogoutAdminUseCase + Send + Sync + 'static,
    ) -> Self {
        self.logout = Arc::new(uc);
        self
    }

    pub fn with_get_session(mut self, uc: impl GetSessionUseCase + Send + Sync + 'static) -> Self {
        self.session = Arc::new(uc);
        self
    }

    pub fn with_media_backend(mut self, store: InMemoryObjectStore, oracle: FakeSessionOracle) -> Self {
        self.store = store;
        self.oracle = oracle;
        self
    }

    pub fn with_asset_reader(mut self, reader: MapAssetReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_gallery(mut self, library: Arc<MediaLibrary>) -> Self {
        self.gallery = Some(library);
        self
    }

    pub fn with_videos(mut self, library: Arc<MediaLibrary>) -> Self {
        self.videos = Some(library);
        self
    }

    pub fn with_notifications(mut self, log: Arc<NotificationLog>) -> Self {
        self.notifications = log;
        self
    }

    /// Store probed by `/ready`; defaults to the media backend's store.
    pub fn with_object_store(mut self, store: impl ObjectStore + 'static) -> Self {
        self.object_store = Some(Arc::new(store));
        self
    }

    /// The log the built state notifies into.
    pub fn notification_log(&self) -> Arc<NotificationLog> {
        Arc::clone(&self.notifications)
    }

    fn library_deps(&self) -> MediaLibraryDeps {
        MediaLibraryDeps {
            list_assets: Arc::new(ListAssetsService::new(
                self.store.clone(),
                StepClock::new(TEST_CLOCK_START, 1),
            )),
            upload_asset: Arc::new(UploadAssetService::new(
                self.store.clone(),
                self.reader.clone(),
                StepClock::new(TEST_CLOCK_START, 1),
                UploadPolicy::default(),
            )),
            session: Arc::new(self.oracle.clone()),
            notifier: self.notifications.clone(),
        }
    }

    pub fn build(self) -> web::Data<AppState> {
        let gallery = self
            .gallery
            .clone()
            .unwrap_or_else(|| Arc::new(MediaLibrary::gallery(self.library_deps())));
        let videos = self
            .videos
            .clone()
            .unwrap_or_else(|| Arc::new(MediaLibrary::videos(self.library_deps())));
        let object_store: Arc<dyn ObjectStore> = match self.object_store.clone() {
            Some(store) => store,
            None => Arc::new(self.store.clone()),
        };

        web::Data::new(AppState {
            multimedia: MultimediaUseCases { gallery, videos },
            admin: AdminUseCases {
                login: self.login,
                logout: self.logout,
                session: self.session,
            },
            notifications: self.notifications,
            object_store,
        })
    }
}
