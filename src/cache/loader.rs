use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use crate::cache::clock::{Clock, SystemClock};
use crate::cache::policy;
use crate::cache::store::{FeedStore, LocalFeedImage};
use crate::feed::{FeedImage, FeedLoader};
use crate::lifetime::Lifetime;

/// Saves, loads and validates the cached feed held by a [`FeedStore`].
///
/// Every operation exists in two forms. The `async` methods run the workflow while they
/// are awaited; dropping the future abandons it. The `*_with` methods spawn the workflow
/// on the current tokio runtime and report through a one-shot completion. Those
/// completions are tied to the loader: once it is dropped, pending work stops at its
/// next store call and the completion is never invoked.
pub struct LocalFeedLoader<S, C = SystemClock> {
    core: Core<S, C>,
    lifetime: Lifetime,
}

struct Core<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for Core<S, C> {
    fn clone(&self) -> Self {
        Core {
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: FeedStore, C: Clock> Core<S, C> {
    async fn save(&self, feed: Vec<LocalFeedImage>) -> Result<(), S::Error> {
        if let Err(err) = self.store.delete_cached_feed().await {
            debug!(error = %err, "cache deletion failed, not inserting");
            return Err(err);
        }
        let timestamp = self.clock.now();
        trace!(images = feed.len(), %timestamp, "inserting feed into cache");
        self.store.insert(feed, timestamp).await
    }

    async fn load(&self) -> Result<Vec<FeedImage>, S::Error> {
        match self.store.retrieve().await? {
            Some(cache) if policy::validate(cache.timestamp, self.clock.now()) => {
                Ok(cache.feed.into_iter().map(FeedImage::from).collect())
            }
            Some(cache) => {
                debug!(timestamp = %cache.timestamp, "cached feed is stale, delivering empty feed");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn validate_cache(&self) {
        let must_delete = match self.store.retrieve().await {
            Err(err) => {
                warn!(error = %err, "cache retrieval failed, deleting cache");
                true
            }
            Ok(Some(cache)) => {
                let stale = !policy::validate(cache.timestamp, self.clock.now());
                if stale {
                    debug!(timestamp = %cache.timestamp, "deleting stale cache");
                }
                stale
            }
            Ok(None) => false,
        };

        if must_delete {
            if let Err(err) = self.store.delete_cached_feed().await {
                warn!(error = %err, "cache deletion failed during validation");
            }
        }
    }
}

impl<S: FeedStore> LocalFeedLoader<S> {
    /// Loader that reads time from the system clock.
    pub fn with_system_clock(store: Arc<S>) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: FeedStore, C: Clock> LocalFeedLoader<S, C> {
    pub fn new(store: Arc<S>, clock: C) -> Self {
        LocalFeedLoader {
            core: Core {
                store,
                clock: Arc::new(clock),
            },
            lifetime: Lifetime::new(),
        }
    }

    /// Replace the cached feed with `feed`, stamped with the clock's current time.
    ///
    /// The existing cache is deleted first; if that fails its error is returned and
    /// nothing is inserted.
    pub async fn save(&self, feed: &[FeedImage]) -> Result<(), S::Error> {
        self.core.save(to_local(feed)).await
    }

    /// Read the cached feed.
    ///
    /// An empty or stale cache yields an empty feed. Stale data is left in place,
    /// see [`validate_cache`](Self::validate_cache).
    pub async fn load(&self) -> Result<Vec<FeedImage>, S::Error> {
        self.core.load().await
    }

    /// Delete the cache if it is stale or cannot be retrieved.
    pub async fn validate_cache(&self) {
        self.core.validate_cache().await
    }

    /// Callback form of [`save`](Self::save).
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn save_with<F>(&self, feed: &[FeedImage], completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<(), S::Error>) + Send + 'static,
    {
        let core = self.core.clone();
        let feed = to_local(feed);
        self.lifetime.spawn_bound("save", async move { core.save(feed).await }, completion)
    }

    /// Callback form of [`load`](Self::load).
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn load_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<FeedImage>, S::Error>) + Send + 'static,
    {
        let core = self.core.clone();
        self.lifetime.spawn_bound("load", async move { core.load().await }, completion)
    }

    /// Callback form of [`validate_cache`](Self::validate_cache).
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn validate_cache_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let core = self.core.clone();
        self.lifetime.spawn_bound("validate_cache", async move { core.validate_cache().await }, |()| completion())
    }

    /// Validate the cache in the background without waiting for the outcome.
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn validate_cache_in_background(&self) -> JoinHandle<()> {
        self.validate_cache_with(|| {})
    }
}

impl<S: FeedStore, C: Clock> FeedLoader for LocalFeedLoader<S, C> {
    type Error = S::Error;

    fn load(&self) -> impl Future<Output = Result<Vec<FeedImage>, Self::Error>> + Send {
        self.core.load()
    }
}

fn to_local(feed: &[FeedImage]) -> Vec<LocalFeedImage> {
    feed.iter().cloned().map(LocalFeedImage::from).collect()
}
