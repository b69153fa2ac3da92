#![allow(dead_code)]

use std::sync::Mutex;
use chrono::{DateTime, Duration, TimeZone, Utc};
use feed_cache::cache::{CachedFeed, FeedStore, LocalFeedImage};
use feed_cache::FeedImage;
use tokio::sync::{oneshot, Notify};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("any error: {0}")]
pub struct AnyError(pub &'static str);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedImage>, DateTime<Utc>),
    Retrieve,
}

type Pending<T> = Mutex<Vec<oneshot::Sender<Result<T, AnyError>>>>;

/// Store that records every call and lets the test decide when and how each completes.
#[derive(Default)]
pub struct FeedStoreSpy {
    messages: Mutex<Vec<ReceivedMessage>>,
    received: Notify,
    deletions: Pending<()>,
    insertions: Pending<()>,
    retrievals: Pending<Option<CachedFeed>>,
}

impl FeedStoreSpy {
    pub fn messages(&self) -> Vec<ReceivedMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Wait until at least `count` calls have been received.
    pub async fn wait_for_messages(&self, count: usize) {
        loop {
            let received = self.received.notified();
            if self.messages.lock().unwrap().len() >= count {
                return;
            }
            received.await;
        }
    }

    pub fn complete_deletion(&self, result: Result<(), AnyError>, index: usize) {
        complete(&self.deletions, index, result);
    }

    pub fn complete_insertion(&self, result: Result<(), AnyError>, index: usize) {
        complete(&self.insertions, index, result);
    }

    pub fn complete_retrieval(&self, result: Result<Option<CachedFeed>, AnyError>, index: usize) {
        complete(&self.retrievals, index, result);
    }

    fn record<T>(&self, message: ReceivedMessage, pending: &Pending<T>) -> oneshot::Receiver<Result<T, AnyError>> {
        let (tx, rx) = oneshot::channel();
        pending.lock().unwrap().push(tx);
        self.messages.lock().unwrap().push(message);
        self.received.notify_waiters();
        rx
    }
}

fn complete<T>(pending: &Pending<T>, index: usize, result: Result<T, AnyError>) {
    let mut pending = pending.lock().unwrap();
    let (tx, _) = oneshot::channel();
    let sender = std::mem::replace(&mut pending[index], tx);
    // The receiver is gone when the caller abandoned the call.
    let _ = sender.send(result);
}

impl FeedStore for FeedStoreSpy {
    type Error = AnyError;

    async fn delete_cached_feed(&self) -> Result<(), AnyError> {
        let rx = self.record(ReceivedMessage::DeleteCachedFeed, &self.deletions);
        rx.await.unwrap_or(Err(AnyError("abandoned")))
    }

    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<(), AnyError> {
        let rx = self.record(ReceivedMessage::Insert(feed, timestamp), &self.insertions);
        rx.await.unwrap_or(Err(AnyError("abandoned")))
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, AnyError> {
        let rx = self.record(ReceivedMessage::Retrieve, &self.retrievals);
        rx.await.unwrap_or(Err(AnyError("abandoned")))
    }
}

pub fn any_url() -> Url {
    Url::parse("https://any-url.com").unwrap()
}

pub fn unique_image() -> FeedImage {
    FeedImage::new(Uuid::new_v4(), None, None, any_url())
}

pub fn unique_image_feed() -> (Vec<FeedImage>, Vec<LocalFeedImage>) {
    let feed = vec![unique_image(), unique_image()];
    let local = feed.iter().cloned().map(LocalFeedImage::from).collect();
    (feed, local)
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap()
}

pub fn minus_feed_cache_max_age(date: DateTime<Utc>) -> DateTime<Utc> {
    date - Duration::days(7)
}
