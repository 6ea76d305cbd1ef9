//! HTTP surface: routing, shared state, and the server-rendered pages.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod views;

use error::AppError;

/// Application state shared across HTTP handlers. The store handle is the
/// only shared resource; every handler locks it for the length of its
/// store calls and each statement commits on its own.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Borrow the connection for the duration of one request.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Store(anyhow!("song store lock poisoned")))
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_songs))
        .route(
            "/song/new",
            get(handlers::new_song_form).post(handlers::create_song),
        )
        .route("/song/:song_id", get(handlers::view_song))
        .route(
            "/song/:song_id/add_lyrics",
            get(handlers::new_verse_form).post(handlers::create_verse),
        )
        .route(
            "/song/:song_id/lyrics/:verse_id/edit",
            get(handlers::edit_verse_form).post(handlers::update_verse),
        )
        .route("/song/:song_id/delete", post(handlers::delete_song))
        .route(
            "/song/:song_id/lyrics/:verse_id/delete",
            post(handlers::delete_verse),
        )
        .route("/about", get(handlers::about))
        .route("/gear", get(handlers::gear))
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
