use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::model::{QuizSettings, TopicSet};
use quiz_core::wire;

use crate::repository::{SettingsRepository, Storage, StorageError, TopicSetRepository};

const TOPICS_FILE: &str = "quizzes.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonFileInitError {
    #[error("could not create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File-backed store keeping one JSON document per concern inside a data
/// directory: `quizzes.json` for the cached topic set and `settings.json`
/// for quiz settings.
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `JsonFileInitError` if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, JsonFileInitError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| JsonFileInitError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    fn topics_path(&self) -> PathBuf {
        self.dir.join(TOPICS_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    async fn read_document(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }

    // Write to a sibling temp file, then rename over the target. A reader
    // sees either the old document or the new one, never a partial write.
    async fn replace_document(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }
}

#[async_trait]
impl TopicSetRepository for JsonFileStore {
    async fn load(&self) -> Result<TopicSet, StorageError> {
        let bytes = Self::read_document(&self.topics_path())
            .await?
            .ok_or(StorageError::NotFound)?;
        wire::decode_topic_set(&bytes).map_err(|err| StorageError::CorruptData(err.to_string()))
    }

    async fn save(&self, topics: &TopicSet) -> Result<(), StorageError> {
        let bytes =
            wire::encode_topic_set(topics).map_err(|err| StorageError::Io(err.to_string()))?;
        Self::replace_document(&self.topics_path(), &bytes).await
    }
}

/// Persisted shape for quiz settings.
///
/// Mirrors the domain `QuizSettings` so the store can serialize without
/// leaking storage concerns into the domain layer.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsRecord {
    data_source_url: String,
    auto_refresh_enabled: bool,
    refresh_interval_secs: u32,
}

impl SettingsRecord {
    fn from_settings(settings: &QuizSettings) -> Self {
        Self {
            data_source_url: settings.data_source_url().to_string(),
            auto_refresh_enabled: settings.auto_refresh_enabled(),
            refresh_interval_secs: settings.refresh_interval_secs(),
        }
    }

    fn into_settings(self) -> Result<QuizSettings, StorageError> {
        QuizSettings::from_persisted(
            self.data_source_url,
            self.auto_refresh_enabled,
            self.refresh_interval_secs,
        )
        .map_err(|err| StorageError::CorruptData(err.to_string()))
    }
}

#[async_trait]
impl SettingsRepository for JsonFileStore {
    async fn get_settings(&self) -> Result<Option<QuizSettings>, StorageError> {
        let Some(bytes) = Self::read_document(&self.settings_path()).await? else {
            return Ok(None);
        };
        let record: SettingsRecord = serde_json::from_slice(&bytes)
            .map_err(|err| StorageError::CorruptData(err.to_string()))?;
        record.into_settings().map(Some)
    }

    async fn save_settings(&self, settings: &QuizSettings) -> Result<(), StorageError> {
        let record = SettingsRecord::from_settings(settings);
        let bytes =
            serde_json::to_vec_pretty(&record).map_err(|err| StorageError::Io(err.to_string()))?;
        Self::replace_document(&self.settings_path(), &bytes).await
    }
}

impl Storage {
    /// Build a `Storage` backed by JSON documents under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `JsonFileInitError` if the data directory cannot be created.
    pub async fn json_file(dir: impl Into<PathBuf>) -> Result<Self, JsonFileInitError> {
        let store = JsonFileStore::open(dir).await?;
        let topics: Arc<dyn TopicSetRepository> = Arc::new(store.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(store);
        Ok(Self { topics, settings })
    }
}
