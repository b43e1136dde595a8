mod media_library;
#[cfg(test)]
mod scenarios;

pub use media_library::{
    LibraryUploadError, LibraryView, MediaLibrary, MediaLibraryDeps, SelectAssetError,
    ViewerState,
};
