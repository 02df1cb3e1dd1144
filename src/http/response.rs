//! Response helpers and the error taxonomy shared by every handler.
//!
//! # Responsibilities
//! - Map failures to HTTP status codes
//! - Keep client-facing bodies generic; log the detail server-side
//!
//! # Design Decisions
//! - ClientError → 400, NotFound → 404, everything else → 500
//! - Bodies are plain text and never echo request data

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a single request. Terminal for that request only.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Malformed or out-of-bounds request.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// Missing file or unknown route.
    #[error("not found")]
    NotFound,

    /// The workbench template could not be read.
    #[error("failed to read template: {0}")]
    Template(#[source] std::io::Error),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServeError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::BAD_REQUEST => "Bad request.",
            StatusCode::NOT_FOUND => "Not found",
            _ => {
                tracing::error!(error = %self, "Request failed");
                "Internal Server Error"
            }
        };
        plain_text(status, body)
    }
}

/// Plain text response with an explicit content type.
pub fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}
