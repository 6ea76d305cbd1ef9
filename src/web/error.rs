use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use super::views;
use crate::db::NotFound;

/// Terminal failures of a request. Validation problems never get here: they
/// are answered with a redirect back to the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("store failure: {0:#}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<NotFound>() {
            Some(missing) => AppError::NotFound(*missing),
            None => AppError::Store(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(missing) => (
                StatusCode::NOT_FOUND,
                Html(views::not_found(&missing.to_string())),
            )
                .into_response(),
            AppError::Store(err) => {
                error!("Request failed: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::server_error())).into_response()
            }
        }
    }
}
