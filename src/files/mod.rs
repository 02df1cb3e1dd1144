//! Static file serving subsystem.
//!
//! # Data Flow
//! ```text
//! decoded request path
//!     → path.rs (lexical resolution against a root, containment check)
//!     → server.rs (stat, validation token, 304 or streamed 200)
//!         → etag.rs (inode/size/mtime token)
//!         → mime.rs (Content-Type by extension)
//! ```
//!
//! # Design Decisions
//! - Containment is checked on the normalized path before any stat
//! - Tokens are weak and derived from metadata only, never file contents

pub mod etag;
pub mod mime;
pub mod path;
pub mod server;

pub use etag::{ETag, FileIdentity};
pub use server::FileServer;
