use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{QuizSettings, TopicSet};
use storage::repository::{Storage, StorageError};

use crate::Clock;
use crate::auto_refresh::AutoRefreshTask;
use crate::error::SessionError;
use crate::reachability::Reachability;
use crate::remote::{HttpTopicFetcher, TopicFetcher};
use crate::sessions::QuizSession;
use crate::settings_service::SettingsService;
use crate::sync::SyncService;

/// Assembles the quiz services for one process.
///
/// One instance of each collaborator is constructed here and shared by
/// reference; nothing in the library reaches for global state.
#[derive(Clone)]
pub struct QuizServices {
    clock: Clock,
    reachability: Reachability,
    sync: Arc<SyncService>,
    settings: Arc<SettingsService>,
}

impl QuizServices {
    /// Build services over the given storage backend, seeding the topic
    /// cache on a fresh install.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the startup seeding fails.
    pub async fn new(
        storage: Storage,
        reachability: Reachability,
        clock: Clock,
    ) -> Result<Self, StorageError> {
        let fetcher: Arc<dyn TopicFetcher> = Arc::new(HttpTopicFetcher::new(reachability.clone()));
        Self::with_fetcher(storage, fetcher, reachability, clock).await
    }

    /// Like `new`, with a caller-supplied fetcher (tests, alternate
    /// transports).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the startup seeding fails.
    pub async fn with_fetcher(
        storage: Storage,
        fetcher: Arc<dyn TopicFetcher>,
        reachability: Reachability,
        clock: Clock,
    ) -> Result<Self, StorageError> {
        storage.topics.ensure_seeded().await?;

        let sync = Arc::new(SyncService::new(
            fetcher,
            Arc::clone(&storage.topics),
            reachability.clone(),
        ));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));

        Ok(Self {
            clock,
            reachability,
            sync,
            settings,
        })
    }

    #[must_use]
    pub fn sync(&self) -> Arc<SyncService> {
        Arc::clone(&self.sync)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn reachability(&self) -> Reachability {
        self.reachability.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a quiz session for the topic at `topic_index` in `topics`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownTopic` for an out-of-range index and
    /// `SessionError::Empty` for a topic without questions.
    pub fn start_session(
        &self,
        topics: &TopicSet,
        topic_index: usize,
    ) -> Result<QuizSession, SessionError> {
        let entry = topics
            .get(topic_index)
            .ok_or(SessionError::UnknownTopic { index: topic_index })?;
        QuizSession::new(topic_index, entry.questions.clone(), self.clock.now())
    }

    /// Spawn the periodic refresh task when enabled in `settings`.
    #[must_use]
    pub fn spawn_auto_refresh(&self, settings: &QuizSettings) -> Option<AutoRefreshTask> {
        if !settings.auto_refresh_enabled() {
            return None;
        }
        Some(AutoRefreshTask::spawn(
            self.sync.as_ref().clone(),
            self.reachability.clone(),
            settings.data_source_url().to_string(),
            Duration::from_secs(u64::from(settings.refresh_interval_secs())),
        ))
    }
}
