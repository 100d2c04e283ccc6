use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_FONT_SIZE: i32 = 16;

// widths of the VARCHAR columns in the notes table, in characters
pub const TITLE_MAX_CHARS: usize = 100;
pub const TEXT_COLOR_MAX_CHARS: usize = 50;

fn default_text_color() -> Option<String> {
  Some(DEFAULT_TEXT_COLOR.to_string())
}

fn default_font_size() -> Option<i32> {
  Some(DEFAULT_FONT_SIZE)
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
  pub id: String,
  pub title: Option<String>,
  pub content: Option<String>,
  pub text_color: Option<String>,
  pub font_size: Option<i32>,
  pub timestamp: i64
}

impl Note {
  pub fn new(id: impl Into<String>, fields: NoteFields) -> Self {
    let NoteFields { title, content, text_color, font_size, timestamp } = fields;
    Note { id: id.into(), title, content, text_color, font_size, timestamp }
  }

  pub fn column_overflow(&self) -> Option<String> {
    column_overflow(self.title.as_deref(), self.text_color.as_deref())
  }
}

/// Mutable part of a note. A PUT replaces all of these at once.
///
/// `text_color` and `font_size` fall back to their defaults only when the key
/// is missing; an explicit `null` is kept.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NoteFields {
  pub title: Option<String>,
  pub content: Option<String>,
  #[serde(default = "default_text_color")]
  pub text_color: Option<String>,
  #[serde(default = "default_font_size")]
  pub font_size: Option<i32>,
  pub timestamp: i64
}

/// Message for the first value wider than its column, worded like Postgres reports it.
pub fn column_overflow(title: Option<&str>, text_color: Option<&str>) -> Option<String> {
  [(title, TITLE_MAX_CHARS), (text_color, TEXT_COLOR_MAX_CHARS)]
    .into_iter()
    .find(|(value, max)| value.map_or(false, |v| v.chars().count() > *max))
    .map(|(_, max)| format!("value too long for type character varying({max})"))
}

impl NoteFields {
  pub fn column_overflow(&self) -> Option<String> {
    column_overflow(self.title.as_deref(), self.text_color.as_deref())
  }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CreateNotePayload {
  pub id: String,
  #[serde(flatten)]
  pub fields: NoteFields
}

impl From<CreateNotePayload> for Note {
  fn from(payload: CreateNotePayload) -> Self {
    Note::new(payload.id, payload.fields)
  }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
  pub message: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteAllResponse {
  pub message: String,
  pub count: u64
}
