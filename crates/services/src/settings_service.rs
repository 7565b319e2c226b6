use std::sync::Arc;

use quiz_core::model::{QuizSettings, QuizSettingsDraft};
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

/// Load, validate, and persist the user-adjustable sync settings.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if nothing was ever saved).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<QuizSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation or persistence fails.
    pub async fn save(
        &self,
        draft: QuizSettingsDraft,
    ) -> Result<QuizSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Restore and persist the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn reset(&self) -> Result<QuizSettings, SettingsServiceError> {
        let settings = QuizSettings::default();
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }
}
