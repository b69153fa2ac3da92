use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;
use crate::api::client::HttpClient;
use crate::api::mapper;
use crate::feed::{FeedImage, FeedLoader};
use crate::lifetime::Lifetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFeedError {
    #[error("could not reach the feed endpoint")]
    Connectivity,
    #[error("feed endpoint returned invalid data")]
    InvalidData,
}

/// Loads the feed from `url` through an [`HttpClient`].
///
/// Like the local loader, [`load_with`](Self::load_with) ties its completion to the
/// loader: a response that arrives after the loader is dropped is never delivered.
pub struct RemoteFeedLoader<H> {
    url: Url,
    client: Arc<H>,
    lifetime: Lifetime,
}

impl<H: HttpClient> RemoteFeedLoader<H> {
    pub fn new(url: Url, client: H) -> Self {
        RemoteFeedLoader {
            url,
            client: Arc::new(client),
            lifetime: Lifetime::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and decode the feed.
    /// # Errors
    /// [`RemoteFeedError::Connectivity`] if the request fails, [`RemoteFeedError::InvalidData`]
    /// if the response is not a valid feed.
    pub async fn load(&self) -> Result<Vec<FeedImage>, RemoteFeedError> {
        fetch(self.client.as_ref(), &self.url).await
    }
}

impl<H: HttpClient + 'static> RemoteFeedLoader<H> {
    /// Callback form of [`load`](Self::load).
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn load_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<FeedImage>, RemoteFeedError>) + Send + 'static,
    {
        let client = self.client.clone();
        let url = self.url.clone();
        self.lifetime.spawn_bound("remote_load", async move { fetch(client.as_ref(), &url).await }, completion)
    }
}

async fn fetch<H: HttpClient>(client: &H, url: &Url) -> Result<Vec<FeedImage>, RemoteFeedError> {
    let response = client.get(url).await.map_err(|err| {
        warn!(%url, error = %err, "feed request failed");
        RemoteFeedError::Connectivity
    })?;
    mapper::map(&response.body, response.status)
}

impl<H: HttpClient> FeedLoader for RemoteFeedLoader<H> {
    type Error = RemoteFeedError;

    fn load(&self) -> impl Future<Output = Result<Vec<FeedImage>, Self::Error>> + Send {
        RemoteFeedLoader::load(self)
    }
}
