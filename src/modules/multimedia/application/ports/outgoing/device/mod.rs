mod asset_reader;
mod clock;
mod media_picker;

pub use asset_reader::{AssetReadError, AssetReader};
pub use clock::Clock;
pub use media_picker::{MediaPicker, PickerError, PickerFilter, PickerResult};
