pub mod cloud_storage;
pub mod device;
