//! Remote feed loading.
//!
//! [`RemoteFeedLoader`] fetches the feed through an [`HttpClient`] and decodes it with
//! [`mapper::map`].

pub mod client;
pub mod loader;
pub mod mapper;

/// [`HttpClient`] backed by reqwest.
#[cfg(feature = "http")]
pub mod reqwest_client;

pub use client::{HttpClient, HttpResponse};
pub use loader::{RemoteFeedError, RemoteFeedLoader};
#[cfg(feature = "http")]
pub use reqwest_client::ReqwestHttpClient;
