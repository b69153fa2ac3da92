use std::convert::Infallible;
use std::sync::Arc;
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use crate::cache::store::{CachedFeed, FeedStore, LocalFeedImage};

/// [`FeedStore`] that keeps the cached feed in memory.
///
/// Every operation completes without suspending, so side effects apply in the order
/// they were issued. Readers get a snapshot and never block writers.
#[derive(Debug, Default)]
pub struct InMemoryFeedStore {
    slot: ArcSwapOption<CachedFeed>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `cache`.
    pub fn with_cache(cache: CachedFeed) -> Self {
        InMemoryFeedStore {
            slot: ArcSwapOption::from_pointee(cache),
        }
    }
}

impl FeedStore for InMemoryFeedStore {
    type Error = Infallible;

    async fn delete_cached_feed(&self) -> Result<(), Infallible> {
        self.slot.store(None);
        Ok(())
    }

    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<(), Infallible> {
        self.slot.store(Some(Arc::new(CachedFeed { feed, timestamp })));
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, Infallible> {
        Ok(self.slot.load_full().map(|cache| CachedFeed::clone(&cache)))
    }
}
