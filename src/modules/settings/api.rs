use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use crate::error::ApiError;
use crate::types::AppState;

use crate::modules::settings::types::Settings;

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<Settings>, ApiError> {
    let settings = state.settings.get_settings().await?;
    Ok(Json(settings))
}

/// Stores the posted object as-is and echoes it back.
pub async fn save_settings(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<Settings>, ApiError>,
) -> Result<Json<Settings>, ApiError> {
    state.settings.save_settings(&body).await?;
    tracing::info!("saved settings ({} bytes)", body.as_json().len());

    Ok(Json(body))
}
