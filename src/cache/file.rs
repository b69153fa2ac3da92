use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;
use crate::cache::store::{CachedFeed, FeedStore, LocalFeedImage};

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("failed to access feed cache at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("feed cache at {} holds invalid data", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode feed cache")]
    Encode(#[source] serde_json::Error),
}

/// On-disk layout of the cache file.
#[derive(Serialize, Deserialize)]
struct StoredFeed {
    feed: Vec<StoredImage>,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct StoredImage {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: Url,
}

impl From<LocalFeedImage> for StoredImage {
    fn from(value: LocalFeedImage) -> Self {
        StoredImage {
            id: value.id,
            description: value.description,
            location: value.location,
            url: value.url,
        }
    }
}

impl From<StoredImage> for LocalFeedImage {
    fn from(value: StoredImage) -> Self {
        LocalFeedImage {
            id: value.id,
            description: value.description,
            location: value.location,
            url: value.url,
        }
    }
}

/// Staging file of an insert. Removed on drop unless it was renamed into place, which
/// covers failed writes and renames as well as inserts abandoned mid-way.
struct StagingFile {
    path: PathBuf,
    committed: bool,
}

impl StagingFile {
    fn new(path: PathBuf) -> Self {
        StagingFile { path, committed: false }
    }

    fn committed(mut self) {
        self.committed = true;
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.committed {
            // May not exist if the write never started.
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// [`FeedStore`] that keeps the cached feed as a JSON file.
///
/// A missing file is an empty cache. Inserts write a sibling temporary file and rename
/// it over the cache file, so a concurrent retrieval sees either the old or the new
/// snapshot.
#[derive(Debug)]
pub struct FileFeedStore {
    path: PathBuf,
    side_effects: Mutex<()>,
}

impl FileFeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFeedStore {
            path: path.into(),
            side_effects: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> FileStoreError {
        FileStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl FeedStore for FileFeedStore {
    type Error = FileStoreError;

    async fn delete_cached_feed(&self) -> Result<(), FileStoreError> {
        let _serial = self.side_effects.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<(), FileStoreError> {
        let stored = StoredFeed {
            feed: feed.into_iter().map(StoredImage::from).collect(),
            timestamp,
        };
        let encoded = serde_json::to_vec(&stored).map_err(FileStoreError::Encode)?;

        let _serial = self.side_effects.lock().await;
        let staging = StagingFile::new(self.staging_path());
        tokio::fs::write(&staging.path, encoded).await.map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&staging.path, &self.path).await.map_err(|e| self.io_error(e))?;
        staging.committed();
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, FileStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        let stored: StoredFeed = serde_json::from_slice(&bytes).map_err(|source| FileStoreError::Decode {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(CachedFeed {
            feed: stored.feed.into_iter().map(LocalFeedImage::from).collect(),
            timestamp: stored.timestamp,
        }))
    }
}
