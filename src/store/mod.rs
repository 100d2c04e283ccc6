//! Persistence for notes and the settings singleton.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::notes::types::{Note, NoteFields};
use crate::modules::settings::types::Settings;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ConnectionPool, PgStore};

pub const NOTES_TABLE_NAME: &str = "notes";
pub const SETTINGS_TABLE_NAME: &str = "user_settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note {0} already exists")]
    DuplicateId(String),

    #[error("{0}")]
    ValueTooLong(String),

    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] bb8::RunError<tokio_postgres::Error>),

    #[error("migration failed: {0}")]
    Migration(#[from] refinery::Error),

    #[error("stored settings are not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, in whatever order the backend returns them.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Note>, StoreError>;

    async fn create(&self, note: Note) -> Result<Note, StoreError>;

    /// Replaces every mutable field. `None` when no note has this id.
    async fn update(&self, id: &str, fields: NoteFields) -> Result<Option<Note>, StoreError>;

    /// `false` when no note has this id.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The saved mapping, or an empty one before the first save.
    async fn get_settings(&self) -> Result<Settings, StoreError>;

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;
}
