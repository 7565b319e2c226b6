use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use quiz_core::model::TopicSet;
use storage::repository::{StorageError, TopicSetRepository};

use crate::error::{FetchError, SyncError};
use crate::reachability::Reachability;
use crate::remote::TopicFetcher;

/// Where the topics in a `RefreshOutcome` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicOrigin {
    /// Fresh from the remote source, persisted to the cache.
    Remote,
    /// Read from the local cache.
    Cache,
    /// Built-in defaults written because no usable cache existed.
    Seeded,
}

/// Result of a refresh: always a usable topic set, plus the fetch error when
/// the remote path failed and the cache stood in.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub topics: TopicSet,
    pub origin: TopicOrigin,
    pub fetch_error: Option<FetchError>,
}

/// Orchestrates the remote fetcher and the local cache.
///
/// Remote fetch is best-effort; the cache is the durable source of truth for
/// display. A refresh returns a hard error only when the fetch and the local
/// load both fail.
#[derive(Clone)]
pub struct SyncService {
    fetcher: Arc<dyn TopicFetcher>,
    store: Arc<dyn TopicSetRepository>,
    reachability: Reachability,
    refresh_gate: Arc<Mutex<()>>,
}

impl SyncService {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn TopicFetcher>,
        store: Arc<dyn TopicSetRepository>,
        reachability: Reachability,
    ) -> Self {
        Self {
            fetcher,
            store,
            reachability,
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Refresh the topic set, queueing behind any refresh already in flight.
    ///
    /// With `force_remote` false, or while the network is unavailable, only
    /// the local cache is consulted and no network access is attempted.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Storage` when the local-only path fails, and
    /// `SyncError::Unavailable` when a remote fetch and the local fallback
    /// both fail.
    pub async fn refresh(
        &self,
        url: &str,
        force_remote: bool,
    ) -> Result<RefreshOutcome, SyncError> {
        let _guard = self.refresh_gate.lock().await;
        self.refresh_locked(url, force_remote).await
    }

    /// Like `refresh`, but skips instead of queueing when another refresh is
    /// already in flight. Returns `None` when skipped.
    ///
    /// # Errors
    ///
    /// As `refresh`, wrapped in `Some` when the refresh actually ran.
    pub async fn refresh_if_idle(
        &self,
        url: &str,
        force_remote: bool,
    ) -> Option<Result<RefreshOutcome, SyncError>> {
        let guard = self.refresh_gate.try_lock().ok()?;
        let outcome = self.refresh_locked(url, force_remote).await;
        drop(guard);
        Some(outcome)
    }

    async fn refresh_locked(
        &self,
        url: &str,
        force_remote: bool,
    ) -> Result<RefreshOutcome, SyncError> {
        if !force_remote || !self.reachability.is_available() {
            let (topics, origin) = self.load_or_seed().await?;
            return Ok(RefreshOutcome {
                topics,
                origin,
                fetch_error: None,
            });
        }

        match self.fetcher.fetch(url).await {
            Ok(topics) => {
                if let Err(err) = self.store.save(&topics).await {
                    warn!(error = %err, "failed to persist fetched topics");
                }
                Ok(RefreshOutcome {
                    topics,
                    origin: TopicOrigin::Remote,
                    fetch_error: None,
                })
            }
            Err(fetch_error) => {
                warn!(error = %fetch_error, "remote fetch failed, falling back to cache");
                match self.load_or_seed().await {
                    Ok((topics, origin)) => Ok(RefreshOutcome {
                        topics,
                        origin,
                        fetch_error: Some(fetch_error),
                    }),
                    Err(SyncError::Storage(storage)) => Err(SyncError::Unavailable {
                        fetch: fetch_error,
                        storage,
                    }),
                    Err(err) => Err(err),
                }
            }
        }
    }

    // Local path: cache hit, or seed defaults when the cache is missing or
    // no longer decodes.
    async fn load_or_seed(&self) -> Result<(TopicSet, TopicOrigin), SyncError> {
        match self.store.load().await {
            Ok(topics) => {
                debug!("serving topics from cache");
                Ok((topics, TopicOrigin::Cache))
            }
            Err(StorageError::NotFound) => {
                let seed = TopicSet::default_seed();
                self.store.save(&seed).await?;
                Ok((seed, TopicOrigin::Seeded))
            }
            Err(StorageError::CorruptData(reason)) => {
                warn!(%reason, "cached topics are corrupt, re-seeding defaults");
                let seed = TopicSet::default_seed();
                self.store.save(&seed).await?;
                Ok((seed, TopicOrigin::Seeded))
            }
            Err(err) => Err(err.into()),
        }
    }
}
