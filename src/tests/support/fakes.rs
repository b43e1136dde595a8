//! In-memory stand-ins for the outgoing ports, shared by service, library and
//! route tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::application::{
    domain::entities::SessionUser,
    ports::outgoing::{SessionError, SessionOracle},
};
use crate::multimedia::application::{
    domain::entities::Bucket,
    ports::outgoing::{
        cloud_storage::{ObjectStore, ObjectStoreError, StoredObject, UploadOptions},
        device::{AssetReadError, AssetReader, Clock, MediaPicker, PickerError, PickerFilter, PickerResult},
    },
};

// ============================================================================
// Object store
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub bucket: Bucket,
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub options: UploadOptions,
}

#[derive(Default)]
struct StoreState {
    objects: HashMap<Bucket, Vec<String>>,
    list_error: Option<ObjectStoreError>,
    upload_error: Option<ObjectStoreError>,
    uploads: Vec<RecordedUpload>,
    list_calls: usize,
}

/// Keeps object names per bucket; successful uploads become listable.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryObjectStore {
    pub fn with_objects(self, bucket: Bucket, names: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .objects
            .entry(bucket)
            .or_default()
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn fail_list_with(&self, err: ObjectStoreError) {
        self.state.lock().unwrap().list_error = Some(err);
    }

    pub fn restore_list(&self) {
        self.state.lock().unwrap().list_error = None;
    }

    pub fn fail_upload_with(&self, err: ObjectStoreError) {
        self.state.lock().unwrap().upload_error = Some(err);
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn url_for(bucket: Bucket, name: &str) -> String {
        format!("https://cdn.test/storage/v1/object/public/{bucket}/{name}")
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list(&self, bucket: Bucket) -> Result<Vec<StoredObject>, ObjectStoreError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if let Some(err) = state.list_error.clone() {
            return Err(err);
        }
        Ok(state
            .objects
            .get(&bucket)
            .map(|names| names.iter().map(StoredObject::new).collect())
            .unwrap_or_default())
    }

    async fn public_url(&self, bucket: Bucket, name: &str) -> Result<String, ObjectStoreError> {
        Ok(Self::url_for(bucket, name))
    }

    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<(), ObjectStoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.upload_error.clone() {
            return Err(err);
        }
        state.uploads.push(RecordedUpload {
            bucket,
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes,
            options,
        });
        state
            .objects
            .entry(bucket)
            .or_default()
            .push(name.to_string());
        Ok(())
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Starts at `start` and advances by `step` on every read.
pub struct StepClock {
    next: AtomicI64,
    step: i64,
}

impl StepClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }

    pub fn fixed(at: i64) -> Self {
        Self::new(at, 0)
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

// ============================================================================
// Session oracle
// ============================================================================

#[derive(Clone)]
pub struct FakeSessionOracle {
    answer: Arc<Mutex<Result<Option<SessionUser>, SessionError>>>,
    calls: Arc<Mutex<usize>>,
}

impl FakeSessionOracle {
    fn answering(answer: Result<Option<SessionUser>, SessionError>) -> Self {
        Self {
            answer: Arc::new(Mutex::new(answer)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn signed_in() -> Self {
        Self::answering(Ok(Some(test_user())))
    }

    pub fn anonymous() -> Self {
        Self::answering(Ok(None))
    }

    pub fn unavailable() -> Self {
        Self::answering(Err(SessionError::Unavailable("auth down".into())))
    }

    pub fn sign_out(&self) {
        *self.answer.lock().unwrap() = Ok(None);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionOracle for FakeSessionOracle {
    async fn current_user(&self) -> Result<Option<SessionUser>, SessionError> {
        *self.calls.lock().unwrap() += 1;
        self.answer.lock().unwrap().clone()
    }
}

pub fn test_user() -> SessionUser {
    SessionUser {
        id: Uuid::new_v4(),
        email: Some("owner@portfolio.dev".into()),
    }
}

// ============================================================================
// Picker / reader
// ============================================================================

/// Returns the same scripted answer on every call and records the filters asked for.
#[derive(Clone)]
pub struct ScriptedPicker {
    answer: Result<PickerResult, PickerError>,
    filters: Arc<Mutex<Vec<PickerFilter>>>,
}

impl ScriptedPicker {
    pub fn new(answer: PickerResult) -> Self {
        Self {
            answer: Ok(answer),
            filters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(err: PickerError) -> Self {
        Self {
            answer: Err(err),
            filters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(PickerResult::Cancelled)
    }

    pub fn calls(&self) -> Vec<PickerFilter> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaPicker for ScriptedPicker {
    async fn pick(&self, filter: PickerFilter) -> Result<PickerResult, PickerError> {
        self.filters.lock().unwrap().push(filter);
        self.answer.clone()
    }
}

#[derive(Clone, Default)]
pub struct MapAssetReader {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    reads: Arc<Mutex<usize>>,
}

impl MapAssetReader {
    pub fn with_file(self, uri: &str, bytes: &[u8]) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(uri.to_string(), bytes.to_vec());
        self
    }

    /// How many times content was read; size lookups are not counted.
    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    fn lookup(&self, uri: &str) -> Result<Vec<u8>, AssetReadError> {
        self.files
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| AssetReadError::NotFound(uri.to_string()))
    }
}

#[async_trait]
impl AssetReader for MapAssetReader {
    async fn size(&self, uri: &str) -> Result<u64, AssetReadError> {
        self.lookup(uri).map(|bytes| bytes.len() as u64)
    }

    async fn read(&self, uri: &str) -> Result<Vec<u8>, AssetReadError> {
        *self.reads.lock().unwrap() += 1;
        self.lookup(uri)
    }
}
