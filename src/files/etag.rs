//! Weak cache validation tokens.

use std::fmt;
use std::fs::Metadata;
use std::time::UNIX_EPOCH;

/// The identity of a file revision: inode, size and modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileIdentity {
    pub inode: u64,
    pub size: u64,
    pub modified_ms: u128,
}

impl FileIdentity {
    /// Read the identity triple from file metadata.
    pub fn from_metadata(metadata: &Metadata) -> std::io::Result<Self> {
        let modified_ms = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Ok(Self {
            inode: inode(metadata),
            size: metadata.len(),
            modified_ms,
        })
    }

    pub fn etag(&self) -> ETag {
        ETag(format!(
            "W/\"{}-{}-{}\"",
            self.inode, self.size, self.modified_ms
        ))
    }
}

#[cfg(unix)]
fn inode(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn inode(_metadata: &Metadata) -> u64 {
    0
}

/// A weak `ETag` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ETag(String);

impl ETag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against an `If-None-Match` header value.
    pub fn matches(&self, if_none_match: Option<&str>) -> bool {
        if_none_match == Some(self.0.as_str())
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: FileIdentity = FileIdentity {
        inode: 42,
        size: 10,
        modified_ms: 1_700_000_000_000,
    };

    #[test]
    fn test_format() {
        assert_eq!(IDENTITY.etag().as_str(), "W/\"42-10-1700000000000\"");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(IDENTITY.etag(), IDENTITY.etag());
        assert!(IDENTITY.etag().matches(Some("W/\"42-10-1700000000000\"")));
        assert!(!IDENTITY.etag().matches(None));
        assert!(!IDENTITY.etag().matches(Some("\"42-10-1700000000000\"")));
    }

    #[test]
    fn test_size_or_mtime_change_changes_token() {
        let resized = FileIdentity { size: 11, ..IDENTITY };
        let touched = FileIdentity {
            modified_ms: IDENTITY.modified_ms + 1,
            ..IDENTITY
        };
        assert_ne!(IDENTITY.etag(), resized.etag());
        assert_ne!(IDENTITY.etag(), touched.etag());
    }

    #[test]
    fn test_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"0123456789").unwrap();
        let identity = FileIdentity::from_metadata(&std::fs::metadata(&path).unwrap()).unwrap();
        assert_eq!(identity.size, 10);
        assert!(identity.modified_ms > 0);
    }
}
