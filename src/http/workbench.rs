//! Handlers for the workbench shell: root document, app manifest, static assets.

use std::borrow::Cow;

use axum::{
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::files::FileServer;
use crate::http::response::ServeError;
use crate::http::server::AppState;

/// `/`: the rendered workbench document.
pub async fn root(state: &AppState, params: &[(String, String)]) -> Result<Response, ServeError> {
    let document = state.document.render_root(params).await?;
    Ok(Html(document).into_response())
}

/// `/manifest.json`: fixed, no file system access.
pub fn web_manifest(state: &AppState) -> Response {
    Json(state.manifest.as_ref()).into_response()
}

/// `/favicon.ico`
pub async fn favicon(state: &AppState, headers: &HeaderMap) -> Result<Response, ServeError> {
    state
        .app_files
        .serve(headers, &state.config.paths.favicon_path(), HeaderMap::new())
        .await
}

/// `/static/*` and `/static-extension/*`: decode the remainder and serve it from `files`.
pub async fn static_asset(
    files: &FileServer,
    headers: &HeaderMap,
    remainder: &str,
) -> Result<Response, ServeError> {
    let relative = decode_path(remainder)?;
    files.serve_relative(headers, &relative).await
}

/// Percent-decode a request path. Malformed escapes and non UTF-8 results are rejected.
fn decode_path(raw: &str) -> Result<Cow<'_, str>, ServeError> {
    if !has_valid_escapes(raw) {
        return Err(ServeError::BadRequest("malformed percent escape"));
    }
    urlencoding::decode(raw).map_err(|_| ServeError::BadRequest("path is not valid UTF-8"))
}

/// Every `%` must be followed by two hex digits.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("foo/bar.js").unwrap(), "foo/bar.js");
        assert_eq!(decode_path("out%2Fmain%20file.css").unwrap(), "out/main file.css");
        assert_eq!(decode_path("..%2f..%2Fetc").unwrap(), "../../etc");
    }

    #[test]
    fn test_malformed_escapes_rejected() {
        for raw in ["out/%zz", "out/%", "out/%4", "a%2Gb", "%%41"] {
            assert!(
                matches!(decode_path(raw), Err(ServeError::BadRequest(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(matches!(decode_path("%FF%FE"), Err(ServeError::BadRequest(_))));
    }
}
