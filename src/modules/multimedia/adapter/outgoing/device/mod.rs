mod asset_reader_fs;
mod preset_picker;
mod system_clock;

pub use asset_reader_fs::FsAssetReader;
pub use preset_picker::PresetPicker;
pub use system_clock::SystemClock;
