use async_trait::async_trait;
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::{error::SqlState, NoTls, Row};

use crate::modules::notes::types::{Note, NoteFields};
use crate::modules::settings::types::Settings;

use super::{NoteStore, SettingsStore, StoreError, NOTES_TABLE_NAME, SETTINGS_TABLE_NAME};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub type ConnectionPool = Pool<PostgresConnectionManager<NoTls>>;

const NOTE_COLUMNS: &str = r#"id, title, content, text_color, font_size, "timestamp""#;

// the settings row always lives under this key
const SETTINGS_ROW_ID: i16 = 1;

#[derive(Clone)]
pub struct PgStore {
    pool: ConnectionPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_size: u32) -> Result<Self, StoreError> {
        let manager = PostgresConnectionManager::new_from_stringlike(database_url, NoTls)?;
        let pool = Pool::builder().max_size(max_size).build(manager).await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Applies pending schema migrations. Safe to call on every start.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let report = embedded::migrations::runner().run_async(&mut *conn).await?;

        for migration in report.applied_migrations() {
            tracing::info!("applied migration {}", migration);
        }
        Ok(())
    }

    /// Drops both tables along with the migration history and builds the schema again.
    /// Every note and the settings row are lost.
    pub async fn reset(&self) -> Result<(), StoreError> {
        {
            let conn = self.pool.get().await?;
            conn.batch_execute(&format!(
                "DROP TABLE IF EXISTS {NOTES_TABLE_NAME};
                 DROP TABLE IF EXISTS {SETTINGS_TABLE_NAME};
                 DROP TABLE IF EXISTS refinery_schema_history;"
            ))
            .await?;
        }
        tracing::warn!("dropped {NOTES_TABLE_NAME} and {SETTINGS_TABLE_NAME}");
        self.migrate().await
    }
}

fn note_from_row(row: &Row) -> Result<Note, tokio_postgres::Error> {
    Ok(Note {
        id: row.try_get(0)?,
        title: row.try_get(1)?,
        content: row.try_get(2)?,
        text_color: row.try_get(3)?,
        font_size: row.try_get(4)?,
        timestamp: row.try_get(5)?,
    })
}

/// Turns constraint failures a client can cause into their own variants.
fn classify(err: tokio_postgres::Error, id: &str) -> StoreError {
    if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        return StoreError::DuplicateId(id.to_string());
    }
    if err.code() == Some(&SqlState::STRING_DATA_RIGHT_TRUNCATION) {
        let message = err
            .as_db_error()
            .map(|db| db.message().to_string())
            .unwrap_or_else(|| err.to_string());
        return StoreError::ValueTooLong(message);
    }
    StoreError::Postgres(err)
}

#[async_trait]
impl NoteStore for PgStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let conn = self.pool.get().await?;

        let rows = conn
            .query(&format!("SELECT {NOTE_COLUMNS} FROM {NOTES_TABLE_NAME}"), &[])
            .await?;

        let notes = rows.iter().map(note_from_row).collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    async fn get(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let conn = self.pool.get().await?;

        let row = conn
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM {NOTES_TABLE_NAME} WHERE id = $1"),
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn create(&self, note: Note) -> Result<Note, StoreError> {
        let conn = self.pool.get().await?;

        let row = conn
            .query_one(
                &format!(
                    "INSERT INTO {NOTES_TABLE_NAME} ({NOTE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
                     RETURNING {NOTE_COLUMNS}"
                ),
                &[
                    &note.id,
                    &note.title,
                    &note.content,
                    &note.text_color,
                    &note.font_size,
                    &note.timestamp,
                ],
            )
            .await
            .map_err(|err| classify(err, &note.id))?;

        Ok(note_from_row(&row)?)
    }

    async fn update(&self, id: &str, fields: NoteFields) -> Result<Option<Note>, StoreError> {
        let conn = self.pool.get().await?;

        let row = conn
            .query_opt(
                &format!(
                    r#"UPDATE {NOTES_TABLE_NAME}
                       SET title = $2, content = $3, text_color = $4, font_size = $5, "timestamp" = $6
                       WHERE id = $1
                       RETURNING {NOTE_COLUMNS}"#
                ),
                &[
                    &id,
                    &fields.title,
                    &fields.content,
                    &fields.text_color,
                    &fields.font_size,
                    &fields.timestamp,
                ],
            )
            .await
            .map_err(|err| classify(err, id))?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.pool.get().await?;

        let removed = conn
            .execute(&format!("DELETE FROM {NOTES_TABLE_NAME} WHERE id = $1"), &[&id])
            .await?;

        Ok(removed > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let conn = self.pool.get().await?;
        let removed = conn.execute(&format!("DELETE FROM {NOTES_TABLE_NAME}"), &[]).await?;
        Ok(removed)
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn get_settings(&self) -> Result<Settings, StoreError> {
        let conn = self.pool.get().await?;

        let row = conn
            .query_opt(
                &format!("SELECT settings_data FROM {SETTINGS_TABLE_NAME} WHERE id = $1"),
                &[&SETTINGS_ROW_ID],
            )
            .await?;

        match row {
            Some(row) => {
                let encoded: String = row.try_get(0)?;
                Ok(Settings::from_json(&encoded)?)
            }
            None => Ok(Settings::empty()?),
        }
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let conn = self.pool.get().await?;

        conn.execute(
            &format!(
                "INSERT INTO {SETTINGS_TABLE_NAME} (id, settings_data) VALUES ($1, $2) \
                 ON CONFLICT (id) DO UPDATE SET settings_data = EXCLUDED.settings_data"
            ),
            &[&SETTINGS_ROW_ID, &settings.as_json()],
        )
        .await?;

        Ok(())
    }
}
