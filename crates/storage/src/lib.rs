#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;

pub use json_file::{JsonFileInitError, JsonFileStore};
pub use repository::{
    InMemoryRepository, SettingsRepository, Storage, StorageError, TopicSetRepository,
};
