//! Errors returned by HTTP handlers. Every variant renders as `{"error": "..."}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Note not found")]
    NoteNotFound,

    #[error("{}", .0.body_text())]
    Payload(#[from] JsonRejection),

    #[error("Note with id {0} already exists")]
    Conflict(String),

    #[error("{0}")]
    ValueTooLong(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error")]
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoteNotFound => StatusCode::NOT_FOUND,
            Self::Payload(rejection) => rejection.status(),
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ValueTooLong(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => Self::Conflict(id),
            StoreError::ValueTooLong(message) => Self::ValueTooLong(message),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(cause) = &self {
            tracing::error!("store failure: {cause}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

/// Fallback for paths under `/api` that no route matches.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for a known path called with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_maps_to_conflict() {
        let err = ApiError::from(StoreError::DuplicateId("7".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Note with id 7 already exists");
    }

    #[test]
    fn column_overflow_is_unprocessable() {
        let message = "value too long for type character varying(100)".to_string();
        let err = ApiError::from(StoreError::ValueTooLong(message.clone()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn store_failures_hide_their_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(StoreError::Encoding(cause));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }
}
