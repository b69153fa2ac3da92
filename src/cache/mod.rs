//! Local feed cache.
//!
//! A [`LocalFeedLoader`] saves, loads and validates a single cached snapshot held by a
//! [`FeedStore`]. Whether a snapshot may be served is decided by [`policy::validate`].

pub mod clock;
pub mod file;
pub mod loader;
pub mod memory;
pub mod policy;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use file::{FileFeedStore, FileStoreError};
pub use loader::LocalFeedLoader;
pub use memory::InMemoryFeedStore;
pub use store::{CachedFeed, FeedStore, LocalFeedImage};
