use std::sync::Arc;

use crate::multimedia::application::{domain::entities::Bucket, library::MediaLibrary};

/// The two media screens, shared across request tasks.
#[derive(Clone)]
pub struct MultimediaUseCases {
    pub gallery: Arc<MediaLibrary>,
    pub videos: Arc<MediaLibrary>,
}

impl MultimediaUseCases {
    pub fn library(&self, bucket: Bucket) -> &Arc<MediaLibrary> {
        match bucket {
            Bucket::Gallery => &self.gallery,
            Bucket::Videos => &self.videos,
        }
    }
}
