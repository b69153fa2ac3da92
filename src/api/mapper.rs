//! Decoding of the feed endpoint's response.

use serde::Deserialize;
use url::Url;
use uuid::Uuid;
use crate::api::loader::RemoteFeedError;
use crate::feed::FeedImage;

const OK_200: u16 = 200;

#[derive(Deserialize)]
struct Root {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct Item {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<Item> for FeedImage {
    fn from(value: Item) -> Self {
        FeedImage::new(value.id, value.description, value.location, value.image)
    }
}

/// Map a response to feed images, keeping the order of `items`.
/// # Errors
/// [`RemoteFeedError::InvalidData`] unless the status is 200 and the body is a valid feed.
pub fn map(body: &[u8], status: u16) -> Result<Vec<FeedImage>, RemoteFeedError> {
    if status != OK_200 {
        debug!(status, "unexpected feed response status");
        return Err(RemoteFeedError::InvalidData);
    }
    let root: Root = serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "feed response body could not be decoded");
        RemoteFeedError::InvalidData
    })?;
    Ok(root.items.into_iter().map(FeedImage::from).collect())
}
