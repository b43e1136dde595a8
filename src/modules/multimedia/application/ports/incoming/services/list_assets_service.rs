use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::multimedia::application::{
    domain::entities::{cache_busted_url, Bucket, MediaAsset, StorageKey},
    ports::{
        incoming::use_cases::{ListAssetsError, ListAssetsUseCase},
        outgoing::{cloud_storage::ObjectStore, device::Clock},
    },
};

pub struct ListAssetsService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    store: S,
    clock: C,
    last_stamp: AtomicI64,
}

impl<S, C> ListAssetsService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            last_stamp: AtomicI64::new(i64::MIN),
        }
    }

    /// Current time in millis, but strictly greater than any stamp handed out
    /// before, so two listings never produce the same image URL.
    fn next_stamp(&self) -> i64 {
        let now = self.clock.now_millis();
        let previous = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or(now);
        now.max(previous.saturating_add(1))
    }
}

#[async_trait]
impl<S, C> ListAssetsUseCase for ListAssetsService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    async fn execute(&self, bucket: Bucket) -> Result<Vec<MediaAsset>, ListAssetsError> {
        let objects = self.store.list(bucket).await?;

        let urls = try_join_all(
            objects
                .iter()
                .map(|object| self.store.public_url(bucket, &object.name)),
        )
        .await?;

        let stamp = bucket.cache_busted().then(|| self.next_stamp());

        let assets = objects
            .into_iter()
            .zip(urls)
            .map(|(object, url)| {
                let url = match stamp {
                    Some(stamp) => cache_busted_url(&url, stamp),
                    None => url,
                };
                MediaAsset::new(bucket, StorageKey::from(object.name), url)
            })
            .collect::<Vec<_>>();

        tracing::debug!(%bucket, count = assets.len(), "Listed assets");
        Ok(assets)
    }
}
