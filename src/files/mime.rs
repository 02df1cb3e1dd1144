//! Content-Type lookup by file extension.

use std::path::Path;

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Exact, case-sensitive extension match.
fn text_type(ext: &str) -> Option<&'static str> {
    match ext {
        "html" => Some("text/html"),
        "js" => Some("text/javascript"),
        "json" => Some("application/json"),
        "css" => Some("text/css"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

fn media_type(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "bmp" => Some("image/bmp"),
        "gif" => Some("image/gif"),
        "ico" => Some("image/x-icon"),
        "jpe" | "jpeg" | "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "tga" => Some("image/x-tga"),
        "tif" | "tiff" => Some("image/tiff"),
        "woff" => Some("application/font-woff"),
        _ => None,
    }
}

/// Content type for `path`: text table, then media table, then `text/plain`.
pub fn content_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };
    text_type(ext)
        .or_else(|| media_type(ext))
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_types() {
        assert_eq!(content_type(Path::new("a/b.js")), "text/javascript");
        assert_eq!(content_type(Path::new("index.html")), "text/html");
        assert_eq!(content_type(Path::new("package.json")), "application/json");
        assert_eq!(content_type(Path::new("icon.svg")), "image/svg+xml");
    }

    #[test]
    fn test_media_types_ignore_case() {
        assert_eq!(content_type(Path::new("code.ico")), "image/x-icon");
        assert_eq!(content_type(Path::new("PHOTO.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("font.woff")), "application/font-woff");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(content_type(Path::new("README")), "text/plain");
        assert_eq!(content_type(Path::new("data.bin")), "text/plain");
        // The text table is case-sensitive and the media table has no entry.
        assert_eq!(content_type(Path::new("MAIN.JS")), "text/plain");
    }
}
