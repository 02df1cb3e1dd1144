//! Extension discovery subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     extensions root
//!     → discovery.rs (one task per folder, joined)
//!         → package.json parsed, native-only entries dropped
//!         → browser entry promoted to main, extensionKind forced to web
//!     → catalog.rs (shared future, resolved once)
//!
//! Per request:
//!     document assembler awaits catalog.get()
//! ```
//!
//! # Design Decisions
//! - Discovery never fails as a whole; errors isolate one extension
//! - The catalog is immutable once built

pub mod catalog;
pub mod discovery;
pub mod manifest;

use std::path::PathBuf;

use thiserror::Error;

pub use catalog::ExtensionCatalog;
pub use discovery::discover_extensions;
pub use manifest::ExtensionManifest;

/// Why a single extension folder was skipped.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0:?} is not a JSON object")]
    NotAnObject(PathBuf),

    #[error("{0:?} declares a non-string browser entry")]
    InvalidBrowserEntry(PathBuf),
}
