//! Handlers for the two-step callback handshake.

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::callback::descriptor::request_id;
use crate::callback::{CallbackError, CallbackRegistration};
use crate::http::response::ServeError;
use crate::http::server::AppState;

impl From<CallbackError> for ServeError {
    fn from(err: CallbackError) -> Self {
        match err {
            CallbackError::MissingRequestId => ServeError::BadRequest("missing vscode-requestId"),
        }
    }
}

/// `/callback`: store the redirect and return the confirmation page.
pub async fn register(
    state: &AppState,
    headers: &HeaderMap,
    params: &[(String, String)],
) -> Result<Response, ServeError> {
    let registration =
        CallbackRegistration::from_query(params, &state.config.callback.url_protocol)?;

    tracing::info!(
        callback_id = %registration.request_id,
        scheme = %registration.descriptor.scheme,
        "Callback registered"
    );
    state
        .callbacks
        .register(registration.request_id, registration.descriptor);

    let mut extra = HeaderMap::new();
    extra.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    state
        .app_files
        .serve(headers, &state.config.paths.callback_page_path(), extra)
        .await
}

/// `/fetch-callback`: hand out a stored redirect once; empty body if none.
pub async fn fetch(state: &AppState, params: &[(String, String)]) -> Result<Response, ServeError> {
    let id = request_id(params)?;
    let body = match state.callbacks.take(id) {
        Some(descriptor) => {
            tracing::info!(callback_id = %id, "Callback delivered");
            serde_json::to_string(&descriptor)?
        }
        None => String::new(),
    };
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/json")], body).into_response())
}
