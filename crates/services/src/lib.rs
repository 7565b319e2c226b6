#![forbid(unsafe_code)]

pub mod app_services;
pub mod auto_refresh;
pub mod error;
pub mod reachability;
pub mod remote;
pub mod sessions;
pub mod settings_service;
pub mod sync;

pub use quiz_core::Clock;

pub use app_services::QuizServices;
pub use auto_refresh::AutoRefreshTask;
pub use error::{FetchError, SessionError, SettingsServiceError, SyncError};
pub use reachability::{Reachability, ReachabilityMonitor};
pub use remote::{HttpTopicFetcher, TopicFetcher};
pub use sessions::{QuizSession, SessionProgress, SubmitOutcome};
pub use settings_service::SettingsService;
pub use sync::{RefreshOutcome, SyncService, TopicOrigin};
