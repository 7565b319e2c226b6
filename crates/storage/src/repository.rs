use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{QuizSettings, TopicSet};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("i/o error: {0}")]
    Io(String),
}

/// Repository contract for the cached topic set.
///
/// The cache is a single document replaced wholesale: `save` overwrites
/// whatever was there, and a concurrent `load` must never observe a partial
/// write.
#[async_trait]
pub trait TopicSetRepository: Send + Sync {
    /// Read the cached topic set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the cache was never seeded and
    /// `StorageError::CorruptData` if the stored bytes do not decode.
    async fn load(&self) -> Result<TopicSet, StorageError>;

    /// Replace the cached topic set. Idempotent; last write wins.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn save(&self, topics: &TopicSet) -> Result<(), StorageError>;

    /// Write the built-in default topics if no cache exists yet.
    ///
    /// Safe to call on every startup; a no-op once a cache is present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the existence check or the seed write fails.
    async fn ensure_seeded(&self) -> Result<(), StorageError> {
        match self.load().await {
            Ok(_) | Err(StorageError::CorruptData(_)) => Ok(()),
            Err(StorageError::NotFound) => self.save(&TopicSet::default_seed()).await,
            Err(err) => Err(err),
        }
    }
}

/// Repository contract for persisted quiz settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch saved settings, or `None` when nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn get_settings(&self) -> Result<Option<QuizSettings>, StorageError>;

    /// Persist settings, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &QuizSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    topics: Arc<Mutex<Option<TopicSet>>>,
    settings: Arc<Mutex<Option<QuizSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicSetRepository for InMemoryRepository {
    async fn load(&self) -> Result<TopicSet, StorageError> {
        let guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    async fn save(&self, topics: &TopicSet) -> Result<(), StorageError> {
        let mut guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(topics.clone());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<QuizSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &QuizSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub topics: Arc<dyn TopicSetRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let topics: Arc<dyn TopicSetRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self { topics, settings }
    }
}
