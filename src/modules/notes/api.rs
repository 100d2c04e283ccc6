use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json
};
use axum_extra::extract::WithRejection;

use crate::error::ApiError;
use crate::types::AppState;

use crate::modules::notes::types::*;

/// The bulk-delete path segment. It is still a valid note id for GET and PUT.
pub const ALL_SEGMENT: &str = "all";

pub async fn get_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(notes))
}

async fn find_note(state: &AppState, id: &str) -> Result<Json<Note>, ApiError> {
    match state.notes.get(id).await? {
        Some(note) => Ok(Json(note)),
        None => {
            tracing::debug!("note {id} not found");
            Err(ApiError::NoteNotFound)
        }
    }
}

async fn replace_note(state: &AppState, id: &str, fields: NoteFields) -> Result<Json<Note>, ApiError> {
    let updated_note = state.notes.update(id, fields).await?.ok_or_else(|| {
        tracing::debug!("note {id} not found for update");
        ApiError::NoteNotFound
    })?;
    tracing::info!("updated note {id}");

    Ok(Json(updated_note))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    find_note(&state, &id).await
}

pub async fn get_note_named_all(
    State(state): State<AppState>,
) -> Result<Json<Note>, ApiError> {
    find_note(&state, ALL_SEGMENT).await
}

pub async fn create_note(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateNotePayload>, ApiError>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let created_note = state.notes.create(body.into()).await?;
    tracing::info!("created note {}", created_note.id);

    Ok((StatusCode::CREATED, Json(created_note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<NoteFields>, ApiError>,
) -> Result<Json<Note>, ApiError> {
    replace_note(&state, &id, body).await
}

pub async fn update_note_named_all(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<NoteFields>, ApiError>,
) -> Result<Json<Note>, ApiError> {
    replace_note(&state, ALL_SEGMENT, body).await
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.notes.delete(&id).await? {
        tracing::debug!("note {id} not found for delete");
        return Err(ApiError::NoteNotFound);
    }
    tracing::info!("deleted note {id}");

    Ok(Json(MessageResponse { message: "Note deleted".to_string() }))
}

pub async fn delete_all_notes(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let count = state.notes.delete_all().await?;
    tracing::info!("deleted all {count} notes");

    Ok(Json(DeleteAllResponse {
        message: format!("All {count} notes deleted successfully"),
        count
    }))
}
