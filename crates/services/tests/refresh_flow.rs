use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use quiz_core::model::{Question, Topic, TopicEntry, TopicIcon, TopicSet};
use services::{FetchError, Reachability, SyncError, SyncService, TopicFetcher, TopicOrigin};
use storage::repository::{InMemoryRepository, StorageError, TopicSetRepository};

fn remote_topics() -> TopicSet {
    TopicSet::new(vec![TopicEntry {
        topic: Topic::new("Physics Lab", "Fresh from the server", TopicIcon::Atom),
        questions: vec![
            Question::new(
                "What is the SI unit of force?",
                vec!["Joule".into(), "Newton".into(), "Watt".into()],
                1,
            )
            .unwrap(),
        ],
    }])
}

/// Fetcher that returns a canned result and counts calls.
struct ScriptedFetcher {
    result: Result<TopicSet, FetchError>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    fn ok(topics: TopicSet) -> Self {
        Self {
            result: Ok(topics),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(error: FetchError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TopicFetcher for ScriptedFetcher {
    async fn fetch(&self, _url: &str) -> Result<TopicSet, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(topics) => Ok(topics.clone()),
            Err(FetchError::EmptyResponse) => Err(FetchError::EmptyResponse),
            Err(FetchError::Unreachable) => Err(FetchError::Unreachable),
            Err(other) => panic!("unsupported scripted error: {other}"),
        }
    }
}

/// Store whose reads and writes always fail.
struct OfflineStore;

#[async_trait]
impl TopicSetRepository for OfflineStore {
    async fn load(&self) -> Result<TopicSet, StorageError> {
        Err(StorageError::Io("disk offline".into()))
    }

    async fn save(&self, _topics: &TopicSet) -> Result<(), StorageError> {
        Err(StorageError::Io("disk offline".into()))
    }
}

/// Store that reports corrupt data until something is saved over it.
#[derive(Default)]
struct CorruptUntilSaved {
    saved: std::sync::Mutex<Option<TopicSet>>,
}

#[async_trait]
impl TopicSetRepository for CorruptUntilSaved {
    async fn load(&self) -> Result<TopicSet, StorageError> {
        match self.saved.lock().unwrap().clone() {
            Some(topics) => Ok(topics),
            None => Err(StorageError::CorruptData("truncated document".into())),
        }
    }

    async fn save(&self, topics: &TopicSet) -> Result<(), StorageError> {
        *self.saved.lock().unwrap() = Some(topics.clone());
        Ok(())
    }
}

const URL: &str = "https://example.com/questions.json";

#[tokio::test]
async fn remote_success_persists_exactly_the_fetched_set() {
    let store = Arc::new(InMemoryRepository::new());
    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(ScriptedFetcher::ok(remote_topics())),
        store.clone(),
        reachability,
    );

    let outcome = sync.refresh(URL, true).await.unwrap();
    assert_eq!(outcome.origin, TopicOrigin::Remote);
    assert!(outcome.fetch_error.is_none());
    assert_eq!(outcome.topics, remote_topics());

    // A subsequent local load returns the fetched set unchanged.
    assert_eq!(store.load().await.unwrap(), remote_topics());
}

#[tokio::test]
async fn forced_refresh_without_network_never_fetches() {
    let store = Arc::new(InMemoryRepository::new());
    let fetcher = Arc::new(ScriptedFetcher::ok(remote_topics()));
    let (_monitor, reachability) = Reachability::channel(false);
    let sync = SyncService::new(fetcher.clone(), store, reachability);

    let local_only = sync.refresh(URL, false).await.unwrap();
    let forced = sync.refresh(URL, true).await.unwrap();

    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(forced.topics, local_only.topics);
    assert!(forced.fetch_error.is_none());
}

#[tokio::test]
async fn fresh_install_is_seeded_with_defaults() {
    let store = Arc::new(InMemoryRepository::new());
    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(ScriptedFetcher::failing(FetchError::EmptyResponse)),
        store.clone(),
        reachability,
    );

    let outcome = sync.refresh(URL, false).await.unwrap();
    assert_eq!(outcome.origin, TopicOrigin::Seeded);
    assert_eq!(outcome.topics, TopicSet::default_seed());
    assert_eq!(store.load().await.unwrap(), TopicSet::default_seed());
}

#[tokio::test]
async fn fetch_failure_falls_back_to_the_cache() {
    let store = Arc::new(InMemoryRepository::new());
    store.save(&remote_topics()).await.unwrap();

    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(ScriptedFetcher::failing(FetchError::EmptyResponse)),
        store,
        reachability,
    );

    let outcome = sync.refresh(URL, true).await.unwrap();
    assert_eq!(outcome.origin, TopicOrigin::Cache);
    assert_eq!(outcome.topics, remote_topics());
    assert!(matches!(
        outcome.fetch_error,
        Some(FetchError::EmptyResponse)
    ));
}

#[tokio::test]
async fn corrupt_cache_is_reseeded_with_defaults() {
    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(ScriptedFetcher::failing(FetchError::EmptyResponse)),
        Arc::new(CorruptUntilSaved::default()),
        reachability,
    );

    let outcome = sync.refresh(URL, false).await.unwrap();
    assert_eq!(outcome.origin, TopicOrigin::Seeded);
    assert_eq!(outcome.topics, TopicSet::default_seed());
}

#[tokio::test]
async fn failing_fetch_and_failing_store_is_a_hard_error() {
    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(ScriptedFetcher::failing(FetchError::EmptyResponse)),
        Arc::new(OfflineStore),
        reachability,
    );

    let err = sync.refresh(URL, true).await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Unavailable {
            fetch: FetchError::EmptyResponse,
            storage: StorageError::Io(_),
        }
    ));
}

/// Fetcher that signals when entered and blocks until released.
struct BlockedFetcher {
    started: Arc<Notify>,
    release: Arc<Notify>,
    topics: TopicSet,
}

#[async_trait]
impl TopicFetcher for BlockedFetcher {
    async fn fetch(&self, _url: &str) -> Result<TopicSet, FetchError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(self.topics.clone())
    }
}

#[tokio::test]
async fn refresh_if_idle_skips_while_a_refresh_is_in_flight() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let store = Arc::new(InMemoryRepository::new());
    let (_monitor, reachability) = Reachability::channel(true);
    let sync = SyncService::new(
        Arc::new(BlockedFetcher {
            started: started.clone(),
            release: release.clone(),
            topics: remote_topics(),
        }),
        store,
        reachability,
    );

    let background = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.refresh(URL, true).await })
    };
    started.notified().await;

    assert!(sync.refresh_if_idle(URL, true).await.is_none());

    release.notify_one();
    let outcome = background.await.unwrap().unwrap();
    assert_eq!(outcome.origin, TopicOrigin::Remote);

    // The gate is free again once the first refresh completes.
    assert!(sync.refresh_if_idle(URL, false).await.is_some());
}
