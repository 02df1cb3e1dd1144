//! Conditional, streaming file responses.
//!
//! # Responsibilities
//! - Enforce root containment before touching the file system
//! - Answer `If-None-Match` hits with 304 and no body
//! - Stream file contents in fixed-size chunks
//!
//! # Design Decisions
//! - The file is opened before the response is returned; any failure up to
//!   that point is a 404, failures mid-stream end the body
//! - Caller-supplied headers are merged last and may override Content-Type

use std::path::{Path, PathBuf};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::stream;
use tokio::{fs::File, io::AsyncReadExt};

use crate::files::etag::FileIdentity;
use crate::files::{mime, path};
use crate::http::response::ServeError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Serves files found under a single root directory.
#[derive(Debug, Clone)]
pub struct FileServer {
    root: PathBuf,
}

impl FileServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: path::normalize(&root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve a decoded path relative to the root.
    pub async fn serve_relative(
        &self,
        request_headers: &HeaderMap,
        relative: &str,
    ) -> Result<Response, ServeError> {
        let file_path = path::resolve(&self.root, relative);
        self.serve(request_headers, &file_path, HeaderMap::new()).await
    }

    /// Serve `file_path`, which must resolve to a location strictly inside the root.
    pub async fn serve(
        &self,
        request_headers: &HeaderMap,
        file_path: &Path,
        extra_headers: HeaderMap,
    ) -> Result<Response, ServeError> {
        let file_path = path::normalize(file_path);
        if !path::is_within(&self.root, &file_path) {
            tracing::warn!(path = %file_path.display(), root = %self.root.display(), "Path escapes served root");
            return Err(ServeError::BadRequest("path outside served root"));
        }

        let metadata = match tokio::fs::metadata(&file_path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(ServeError::NotFound),
            Err(e) => {
                tracing::debug!(path = %file_path.display(), error = %e, "Stat failed");
                return Err(ServeError::NotFound);
            }
        };

        let etag = FileIdentity::from_metadata(&metadata)
            .map_err(|_| ServeError::NotFound)?
            .etag();

        let if_none_match = request_headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok());
        if etag.matches(if_none_match) {
            return Ok(StatusCode::NOT_MODIFIED.into_response());
        }

        let file = File::open(&file_path).await.map_err(|e| {
            tracing::debug!(path = %file_path.display(), error = %e, "Open failed");
            ServeError::NotFound
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::content_type(&file_path)),
        );
        let etag_value = HeaderValue::from_str(etag.as_str())
            .map_err(|e| ServeError::Internal(e.to_string()))?;
        headers.insert(header::ETAG, etag_value);
        headers.extend(extra_headers);

        Ok((StatusCode::OK, headers, file_body(file)).into_response())
    }
}

/// Stream a file to completion, ending the body on the first read error.
fn file_body(file: File) -> Body {
    let chunks = stream::try_unfold(file, |mut file| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let read = file.read(&mut buf).await?;
        if read == 0 {
            return Ok::<_, std::io::Error>(None);
        }
        buf.truncate(read);
        Ok(Some((Bytes::from(buf), file)))
    });
    Body::from_stream(chunks)
}
