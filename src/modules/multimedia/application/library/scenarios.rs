//! End-to-end library behaviour against in-memory ports.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use super::*;
use crate::multimedia::application::{
    domain::{
        entities::{Bucket, MediaAsset},
        policies::UploadPolicy,
    },
    ports::{
        incoming::{
            services::{ListAssetsService, UploadAssetService},
            use_cases::{ListAssetsError, ListAssetsUseCase, UploadAssetError, UploadOutcome},
        },
        outgoing::{cloud_storage::ObjectStoreError, device::PickerResult},
    },
};
use crate::shared::notifications::{Notification, NotificationLog};
use crate::tests::support::fakes::{
    FakeSessionOracle, InMemoryObjectStore, MapAssetReader, ScriptedPicker, StepClock,
};

struct Harness {
    library: MediaLibrary,
    store: InMemoryObjectStore,
    session: FakeSessionOracle,
    log: Arc<NotificationLog>,
}

fn harness(bucket: Bucket, store: InMemoryObjectStore, session: FakeSessionOracle) -> Harness {
    harness_with_reader(bucket, store, session, MapAssetReader::default())
}

fn harness_with_reader(
    bucket: Bucket,
    store: InMemoryObjectStore,
    session: FakeSessionOracle,
    reader: MapAssetReader,
) -> Harness {
    let log = Arc::new(NotificationLog::default());
    let deps = MediaLibraryDeps {
        list_assets: Arc::new(ListAssetsService::new(
            store.clone(),
            StepClock::new(1_700_000_000_000, 1),
        )),
        upload_asset: Arc::new(UploadAssetService::new(
            store.clone(),
            reader,
            StepClock::new(1_700_000_500_000, 1),
            UploadPolicy::default(),
        )),
        session: Arc::new(session.clone()),
        notifier: log.clone(),
    };

    Harness {
        library: MediaLibrary::new(bucket, deps),
        store,
        session,
        log,
    }
}

fn jpeg_picker() -> ScriptedPicker {
    ScriptedPicker::new(PickerResult::Image {
        base64: STANDARD.encode([0xFF, 0xD8, 0xFF]),
        mime_type: Some("image/jpeg".into()),
    })
}

fn keys(assets: &[MediaAsset]) -> Vec<String> {
    assets
        .iter()
        .map(|a| a.storage_key.as_str().to_string())
        .collect()
}

// ----------------------------------------------------------------------------
// Mount
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_mount_lists_every_object_and_offers_upload() {
    let store = InMemoryObjectStore::default()
        .with_objects(Bucket::Gallery, &["image-1.jpg", "image-2.jpg", "image-3.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::signed_in());

    let view = h.library.mount().await;

    assert_eq!(view.bucket, Bucket::Gallery);
    assert_eq!(view.assets.len(), 3);
    assert!(view.can_upload);
    assert!(view.selected.is_none());
    assert!(h.log.drain().is_empty());
}

#[tokio::test]
async fn test_mount_without_session_hides_upload() {
    for bucket in Bucket::ALL {
        let h = harness(bucket, InMemoryObjectStore::default(), FakeSessionOracle::anonymous());

        let view = h.library.mount().await;

        assert!(!view.can_upload, "{bucket} should not offer upload");
    }
}

#[tokio::test]
async fn test_session_outage_counts_as_no_session() {
    let h = harness(
        Bucket::Videos,
        InMemoryObjectStore::default(),
        FakeSessionOracle::unavailable(),
    );

    assert!(!h.library.mount().await.can_upload);
}

#[tokio::test]
async fn test_empty_bucket_listed_twice_stays_empty() {
    let h = harness(Bucket::Videos, InMemoryObjectStore::default(), FakeSessionOracle::anonymous());

    h.library.refresh().await.unwrap();
    assert!(h.library.view().await.assets.is_empty());
    h.library.refresh().await.unwrap();
    assert!(h.library.view().await.assets.is_empty());
    assert!(h.log.drain().is_empty());
}

// ----------------------------------------------------------------------------
// Listing failures
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_listing_failure_keeps_previous_collection() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Gallery, &["image-1.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::anonymous());
    h.library.refresh().await.unwrap();
    let before = h.library.view().await.assets;

    h.store
        .fail_list_with(ObjectStoreError::NetworkInterrupted("offline".into()));
    let err = h.library.refresh().await.unwrap_err();

    assert!(matches!(err, ListAssetsError::Store(_)));
    assert_eq!(h.library.view().await.assets, before);
    assert_eq!(
        h.log.drain(),
        vec![Notification::error("Failed to fetch images")]
    );
}

#[tokio::test]
async fn test_video_listing_failure_message() {
    let store = InMemoryObjectStore::default();
    store.fail_list_with(ObjectStoreError::BucketNotFound);
    let h = harness(Bucket::Videos, store, FakeSessionOracle::anonymous());

    let view = h.library.mount().await;

    assert!(view.assets.is_empty());
    assert_eq!(
        h.log.drain(),
        vec![Notification::error("Failed to fetch videos")]
    );
}

// ----------------------------------------------------------------------------
// Upload
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_upload_without_session_does_nothing() {
    for bucket in Bucket::ALL {
        let h = harness(bucket, InMemoryObjectStore::default(), FakeSessionOracle::anonymous());
        let picker = jpeg_picker();

        let err = h.library.upload(&picker).await.unwrap_err();

        assert_eq!(err, LibraryUploadError::NotPermitted);
        assert!(picker.calls().is_empty());
        assert!(h.store.uploads().is_empty());
        assert!(h.log.drain().is_empty());
    }
}

#[tokio::test]
async fn test_upload_rechecks_session() {
    let h = harness(Bucket::Gallery, InMemoryObjectStore::default(), FakeSessionOracle::signed_in());
    assert!(h.library.mount().await.can_upload);

    h.session.sign_out();
    let err = h.library.upload(&jpeg_picker()).await.unwrap_err();

    assert_eq!(err, LibraryUploadError::NotPermitted);
    assert!(!h.library.view().await.can_upload);
}

#[tokio::test]
async fn test_image_upload_then_listing_includes_new_key() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Gallery, &["image-1.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::signed_in());
    h.library.mount().await;

    let outcome = h.library.upload(&jpeg_picker()).await.unwrap();

    let UploadOutcome::Uploaded { storage_key } = outcome else {
        panic!("expected an upload");
    };
    assert!(Regex::new(r"^image-\d+\.jpg$")
        .unwrap()
        .is_match(storage_key.as_str()));

    let view = h.library.view().await;
    assert_eq!(view.assets.len(), 2);
    let uploaded = view
        .assets
        .iter()
        .find(|a| a.storage_key == storage_key)
        .expect("new asset listed");
    assert!(uploaded.public_url.starts_with(&InMemoryObjectStore::url_for(
        Bucket::Gallery,
        storage_key.as_str()
    )));
    assert_eq!(
        h.log.drain(),
        vec![Notification::success("Image uploaded successfully")]
    );
}

#[tokio::test]
async fn test_cancelled_video_upload_is_silent() {
    let h = harness(Bucket::Videos, InMemoryObjectStore::default(), FakeSessionOracle::signed_in());
    h.library.mount().await;
    let listings_before = h.store.list_calls();

    let outcome = h.library.upload(&ScriptedPicker::cancelled()).await.unwrap();

    assert_eq!(outcome, UploadOutcome::Cancelled);
    assert!(h.store.uploads().is_empty());
    assert!(h.log.drain().is_empty());
    assert_eq!(h.store.list_calls(), listings_before);
}

#[tokio::test]
async fn test_video_upload_uses_document_name_and_type() {
    let reader = MapAssetReader::default().with_file("file:///cache/trip.webm", b"webm-bytes");
    let h = harness_with_reader(
        Bucket::Videos,
        InMemoryObjectStore::default(),
        FakeSessionOracle::signed_in(),
        reader,
    );
    let picker = ScriptedPicker::new(PickerResult::Document {
        uri: "file:///cache/trip.webm".into(),
        name: "trip.webm".into(),
        mime_type: Some("video/webm".into()),
    });

    h.library.upload(&picker).await.unwrap();

    let view = h.library.view().await;
    assert_eq!(view.assets.len(), 1);
    let title = view.assets[0].display_title.clone().unwrap();
    assert!(Regex::new(r"^video-\d+$").unwrap().is_match(&title));
    assert_eq!(h.store.uploads()[0].content_type, "video/webm");
    assert_eq!(
        h.log.drain(),
        vec![Notification::success("Video uploaded successfully")]
    );
}

#[tokio::test]
async fn test_upload_failure_messages_per_bucket() {
    let gallery_store = InMemoryObjectStore::default();
    gallery_store.fail_upload_with(ObjectStoreError::AccessDenied("row-level security".into()));
    let gallery = harness(Bucket::Gallery, gallery_store, FakeSessionOracle::signed_in());

    let err = gallery.library.upload(&jpeg_picker()).await.unwrap_err();
    assert!(matches!(
        err,
        LibraryUploadError::Upload(UploadAssetError::Store(_))
    ));
    assert_eq!(gallery.log.drain(), vec![Notification::error("Upload failed")]);

    let reader = MapAssetReader::default().with_file("file:///v.mp4", b"mp4");
    let videos_store = InMemoryObjectStore::default();
    videos_store.fail_upload_with(ObjectStoreError::PayloadTooLarge);
    let videos = harness_with_reader(
        Bucket::Videos,
        videos_store,
        FakeSessionOracle::signed_in(),
        reader,
    );
    let picker = ScriptedPicker::new(PickerResult::Document {
        uri: "file:///v.mp4".into(),
        name: "v.mp4".into(),
        mime_type: None,
    });

    videos.library.upload(&picker).await.unwrap_err();
    assert_eq!(
        videos.log.drain(),
        vec![Notification::error("Upload failed: Payload too large")]
    );
}

#[tokio::test]
async fn test_refresh_failure_after_upload_keeps_old_list() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Gallery, &["image-1.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::signed_in());
    h.library.mount().await;
    let before = h.library.view().await.assets;

    h.store
        .fail_list_with(ObjectStoreError::NetworkInterrupted("flaky".into()));
    let outcome = h.library.upload(&jpeg_picker()).await.unwrap();

    assert!(matches!(outcome, UploadOutcome::Uploaded { .. }));
    assert_eq!(h.library.view().await.assets, before);
    assert_eq!(
        h.log.drain(),
        vec![
            Notification::success("Image uploaded successfully"),
            Notification::error("Failed to fetch images"),
        ]
    );

    h.store.restore_list();
    h.library.refresh().await.unwrap();
    assert_eq!(h.library.view().await.assets.len(), 2);
}

// ----------------------------------------------------------------------------
// Listing race
// ----------------------------------------------------------------------------

/// First call blocks until released and returns `slow`; later calls return `fast`.
struct GatedListAssets {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    slow: Vec<MediaAsset>,
    fast: Vec<MediaAsset>,
}

#[async_trait]
impl ListAssetsUseCase for GatedListAssets {
    async fn execute(&self, _bucket: Bucket) -> Result<Vec<MediaAsset>, ListAssetsError> {
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(rx) => {
                let _ = rx.await;
                Ok(self.slow.clone())
            }
            None => Ok(self.fast.clone()),
        }
    }
}

#[tokio::test]
async fn test_stale_listing_is_discarded() {
    let (release, gate) = oneshot::channel();
    let asset = |key: &str| MediaAsset::new(Bucket::Videos, key.into(), format!("u/{key}"));
    let store = InMemoryObjectStore::default();
    let deps = MediaLibraryDeps {
        list_assets: Arc::new(GatedListAssets {
            gate: Mutex::new(Some(gate)),
            slow: vec![asset("video-old.mp4")],
            fast: vec![asset("video-old.mp4"), asset("video-new.mp4")],
        }),
        upload_asset: Arc::new(UploadAssetService::new(
            store.clone(),
            MapAssetReader::default(),
            StepClock::fixed(1),
            UploadPolicy::default(),
        )),
        session: Arc::new(FakeSessionOracle::anonymous()),
        notifier: Arc::new(NotificationLog::default()),
    };
    let library = MediaLibrary::videos(deps);

    let slow = library.refresh();
    let fast = async {
        library.refresh().await.unwrap();
        release.send(()).unwrap();
    };
    let (slow_result, ()) = tokio::join!(slow, fast);

    slow_result.unwrap();
    assert_eq!(
        keys(&library.view().await.assets),
        vec!["video-old.mp4", "video-new.mp4"]
    );
}

// ----------------------------------------------------------------------------
// Viewer
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_select_and_close_viewer() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Videos, &["video-1.mp4"]);
    let h = harness(Bucket::Videos, store, FakeSessionOracle::anonymous());
    h.library.mount().await;

    let viewer = h.library.select("video-1.mp4").await.unwrap();
    assert!(viewer.autoplay && viewer.native_controls);
    assert_eq!(
        h.library.view().await.selected.map(|v| v.asset.storage_key),
        Some("video-1.mp4".into())
    );

    assert!(h.library.close_viewer().await);
    assert!(!h.library.close_viewer().await);
    assert!(h.library.view().await.selected.is_none());
}

#[tokio::test]
async fn test_select_unlisted_asset_fails() {
    let h = harness(Bucket::Gallery, InMemoryObjectStore::default(), FakeSessionOracle::anonymous());
    h.library.mount().await;

    assert_eq!(
        h.library.select("image-404.jpg").await.unwrap_err(),
        SelectAssetError::AssetNotListed("image-404.jpg".into())
    );
}

#[tokio::test]
async fn test_image_viewer_has_no_player_flags() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Gallery, &["image-1.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::anonymous());
    h.library.mount().await;

    let viewer = h.library.select("image-1.jpg").await.unwrap();

    assert!(!viewer.autoplay && !viewer.native_controls);
}

#[tokio::test]
async fn test_selection_follows_refresh() {
    let store = InMemoryObjectStore::default().with_objects(Bucket::Gallery, &["image-1.jpg"]);
    let h = harness(Bucket::Gallery, store, FakeSessionOracle::anonymous());
    h.library.mount().await;
    h.library.select("image-1.jpg").await.unwrap();

    // Still listed: selection survives and points at the fresh URL.
    h.library.refresh().await.unwrap();
    let view = h.library.view().await;
    let selected = view.selected.unwrap();
    assert_eq!(selected.asset, view.assets[0]);
}

#[tokio::test]
async fn test_selection_cleared_when_asset_disappears() {
    let (release, gate) = oneshot::channel::<()>();
    drop(release);
    let asset = |key: &str| MediaAsset::new(Bucket::Gallery, key.into(), format!("u/{key}"));
    let deps = MediaLibraryDeps {
        // First listing has the asset, every later one is empty.
        list_assets: Arc::new(GatedListAssets {
            gate: Mutex::new(Some(gate)),
            slow: vec![asset("image-1.jpg")],
            fast: vec![],
        }),
        upload_asset: Arc::new(UploadAssetService::new(
            InMemoryObjectStore::default(),
            MapAssetReader::default(),
            StepClock::fixed(1),
            UploadPolicy::default(),
        )),
        session: Arc::new(FakeSessionOracle::anonymous()),
        notifier: Arc::new(NotificationLog::default()),
    };
    let library = MediaLibrary::gallery(deps);

    library.refresh().await.unwrap();
    library.select("image-1.jpg").await.unwrap();
    library.refresh().await.unwrap();

    let view = library.view().await;
    assert!(view.assets.is_empty());
    assert!(view.selected.is_none());
}
