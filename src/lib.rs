#![cfg_attr(docsrs, feature(doc_auto_cfg))]
//! Load an image feed from a remote endpoint or from a local cache.
//!
//! The local side keeps a single cached snapshot of the feed and decides, based on
//! its age, whether it may still be served. Remote loading is a thin layer over a
//! pluggable HTTP client.

#[macro_use]
mod log;
mod lifetime;

/// Feed domain model and the loader trait shared by local and remote loaders.
pub mod feed;
/// Local cache: store contract, staleness policy, loader and store backends.
pub mod cache;
/// Remote loading over HTTP.
pub mod api;

pub use feed::{FeedImage, FeedLoader};
