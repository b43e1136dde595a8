use async_trait::async_trait;

use crate::multimedia::application::ports::outgoing::device::{
    MediaPicker, PickerError, PickerFilter, PickerResult,
};

/// A picker whose answer is already known: the client picked on its side and
/// sent the result along with the upload request.
#[derive(Debug, Clone)]
pub struct PresetPicker {
    result: PickerResult,
}

impl PresetPicker {
    pub fn new(result: PickerResult) -> Self {
        Self { result }
    }
}

#[async_trait]
impl MediaPicker for PresetPicker {
    async fn pick(&self, filter: PickerFilter) -> Result<PickerResult, PickerError> {
        tracing::debug!(?filter, "Using client-side pick");
        Ok(self.result.clone())
    }
}
