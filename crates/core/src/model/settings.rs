use thiserror::Error;
use url::Url;

/// Data source consulted when no custom URL has been saved.
pub const DEFAULT_DATA_SOURCE_URL: &str = "https://tednewardsandbox.site44.com/questions.json";

/// Auto-refresh period used when none has been saved.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 1800;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("invalid data source URL")]
    InvalidUrl,

    #[error("refresh interval must be at least one second")]
    InvalidRefreshInterval,
}

/// Validated, user-adjustable settings for data synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    data_source_url: String,
    auto_refresh_enabled: bool,
    refresh_interval_secs: u32,
}

/// Unvalidated edits from the settings screen.
#[derive(Clone, Debug)]
pub struct QuizSettingsDraft {
    pub data_source_url: String,
    pub auto_refresh_enabled: bool,
    pub refresh_interval_secs: u32,
}

impl Default for QuizSettingsDraft {
    fn default() -> Self {
        Self {
            data_source_url: DEFAULT_DATA_SOURCE_URL.to_string(),
            auto_refresh_enabled: false,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl QuizSettingsDraft {
    /// Validate and normalize the draft into usable settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidUrl` when the URL is empty or does
    /// not parse as an absolute URL, and `InvalidRefreshInterval` for a zero
    /// interval.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        let data_source_url = self.data_source_url.trim().to_string();
        if data_source_url.is_empty() || Url::parse(&data_source_url).is_err() {
            return Err(QuizSettingsError::InvalidUrl);
        }
        if self.refresh_interval_secs == 0 {
            return Err(QuizSettingsError::InvalidRefreshInterval);
        }

        Ok(QuizSettings {
            data_source_url,
            auto_refresh_enabled: self.auto_refresh_enabled,
            refresh_interval_secs: self.refresh_interval_secs,
        })
    }
}

impl QuizSettings {
    /// Rehydrate settings from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` when the persisted values no longer pass
    /// validation.
    pub fn from_persisted(
        data_source_url: String,
        auto_refresh_enabled: bool,
        refresh_interval_secs: u32,
    ) -> Result<Self, QuizSettingsError> {
        QuizSettingsDraft {
            data_source_url,
            auto_refresh_enabled,
            refresh_interval_secs,
        }
        .validate()
    }

    #[must_use]
    pub fn data_source_url(&self) -> &str {
        &self.data_source_url
    }

    #[must_use]
    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh_enabled
    }

    #[must_use]
    pub fn refresh_interval_secs(&self) -> u32 {
        self.refresh_interval_secs
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            data_source_url: DEFAULT_DATA_SOURCE_URL.to_string(),
            auto_refresh_enabled: false,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}
