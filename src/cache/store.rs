use std::error::Error;
use std::future::Future;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;
use crate::feed::FeedImage;

/// Cache-side representation of a [`FeedImage`].
///
/// Kept apart from the domain type so the cache format can change on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<FeedImage> for LocalFeedImage {
    fn from(value: FeedImage) -> Self {
        let (id, description, location, url) = value.into_parts();
        LocalFeedImage {
            id,
            description,
            location,
            url,
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(value: LocalFeedImage) -> Self {
        FeedImage::new(value.id, value.description, value.location, value.url)
    }
}

/// The snapshot held by a store: the feed and the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: DateTime<Utc>,
}

/// Storage for a single cached feed.
///
/// Implementations must run [`delete_cached_feed`](FeedStore::delete_cached_feed) and
/// [`insert`](FeedStore::insert) one at a time, in the order they were issued.
/// Retrieval may run alongside them.
/// # Errors
/// Errors are opaque to the loader and are passed through untouched.
pub trait FeedStore: Send + Sync + 'static {
    type Error: Error + Send + Sync + 'static;

    /// Remove the cached feed. Succeeds when there is nothing to remove.
    fn delete_cached_feed(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Replace the cached feed.
    fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Read the cached feed. `None` means the cache is empty.
    fn retrieve(&self) -> impl Future<Output = Result<Option<CachedFeed>, Self::Error>> + Send;
}
