use std::error::Error;
use std::future::Future;
use url::Url;

/// Status code and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport used by [`RemoteFeedLoader`](crate::api::RemoteFeedLoader).
/// Public so that custom clients can be plugged in.
/// # Errors
/// Any error means the request did not produce a response.
pub trait HttpClient: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    /// Perform a GET request
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}
