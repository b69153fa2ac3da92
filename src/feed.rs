use std::error::Error;
use std::future::Future;
use url::Url;
use uuid::Uuid;

/// A single image of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedImage {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: Url,
}

impl FeedImage {
    pub fn new(id: Uuid, description: Option<String>, location: Option<String>, url: Url) -> Self {
        FeedImage {
            id,
            description,
            location,
            url,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Split the image into its fields.
    pub fn into_parts(self) -> (Uuid, Option<String>, Option<String>, Url) {
        (self.id, self.description, self.location, self.url)
    }
}

/// Anything that can produce the current feed.
/// # Errors
/// Each loader reports failures with its own error type.
pub trait FeedLoader {
    type Error: Error + Send + Sync + 'static;

    /// Load the feed
    fn load(&self) -> impl Future<Output = Result<Vec<FeedImage>, Self::Error>> + Send;
}
