//! Root document assembly.
//!
//! # Data Flow
//! ```text
//! GET /?gh=owner/repo
//!     → assembler.rs (folder selection, await extension catalog)
//!     → template.rs (attribute escaping, single-pass literal fill)
//!     → text/html
//!
//! GET /manifest.json
//!     → webmanifest.rs (fixed document from [app] config)
//! ```

pub mod assembler;
pub mod template;
pub mod webmanifest;

pub use assembler::{DocumentAssembler, FolderUri, WorkbenchConfiguration};
pub use webmanifest::WebAppManifest;
