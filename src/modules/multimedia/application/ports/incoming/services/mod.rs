mod list_assets_service;
mod upload_asset_service;

pub use list_assets_service::ListAssetsService;
pub use upload_asset_service::UploadAssetService;
