use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::notes::types::{Note, NoteFields};
use crate::modules::settings::types::Settings;

use super::{NoteStore, SettingsStore, StoreError};

/// In-process backend with the same contract as [`super::PgStore`].
/// Settings are kept JSON-encoded, like the `settings_data` column.
#[derive(Default)]
pub struct MemoryStore {
    notes: RwLock<HashMap<String, Note>>,
    settings: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Note>, StoreError> {
        Ok(self.notes.read().await.get(id).cloned())
    }

    async fn create(&self, note: Note) -> Result<Note, StoreError> {
        if let Some(message) = note.column_overflow() {
            return Err(StoreError::ValueTooLong(message));
        }
        let mut notes = self.notes.write().await;
        if notes.contains_key(&note.id) {
            return Err(StoreError::DuplicateId(note.id));
        }
        notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn update(&self, id: &str, fields: NoteFields) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(id) else {
            return Ok(None);
        };
        // only rows that exist get their widths checked
        if let Some(message) = fields.column_overflow() {
            return Err(StoreError::ValueTooLong(message));
        }
        *note = Note::new(id, fields);
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.notes.write().await.remove(id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut notes = self.notes.write().await;
        let count = notes.len() as u64;
        notes.clear();
        Ok(count)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_settings(&self) -> Result<Settings, StoreError> {
        match self.settings.read().await.as_deref() {
            Some(encoded) => Ok(Settings::from_json(encoded)?),
            None => Ok(Settings::empty()?),
        }
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.write().await = Some(settings.as_json().to_string());
        Ok(())
    }
}
