use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod logging;
pub mod modules;
pub mod store;
pub mod types;

use crate::error::{method_not_allowed, route_not_found};
use crate::modules::notes::api::*;
use crate::modules::settings::api::*;

pub use crate::config::Config;
pub use crate::types::AppState;

/// Builds the HTTP surface. Unknown `/api` paths and unsupported methods answer with
/// the JSON error body; any other path is looked up in `static_dir` when one is given.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let notes = Router::new()
        .route(
            "/notes",
            get(get_notes)
            .post(create_note)
            .fallback(method_not_allowed),
        )
        // static segment wins over `:id`, so the note called "all" is served here too
        .route(
            "/notes/all",
            get(get_note_named_all)
            .put(update_note_named_all)
            .delete(delete_all_notes)
            .fallback(method_not_allowed),
        )
        .route(
            "/notes/:id",
            get(get_note)
            .put(update_note)
            .delete(delete_note)
            .fallback(method_not_allowed),
        );

    let settings = Router::new()
        .route(
            "/settings",
            get(get_settings)
            .post(save_settings)
            .fallback(method_not_allowed),
        );

    let api = Router::new()
        .merge(notes)
        .merge(settings)
        .fallback(route_not_found);

    let mut app = Router::new()
        .nest("/api", api)
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
