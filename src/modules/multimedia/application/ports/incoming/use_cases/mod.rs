mod list_assets;
mod upload_asset;

pub use list_assets::{ListAssetsError, ListAssetsUseCase};
pub use upload_asset::{UploadAssetError, UploadAssetUseCase, UploadOutcome};
