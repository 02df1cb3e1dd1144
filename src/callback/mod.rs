//! Callback relay subsystem.
//!
//! # Data Flow
//! ```text
//! GET /callback?vscode-requestId=R&...
//!     → descriptor.rs (parse well-known params, fold extras into query)
//!     → store.rs (register R → descriptor)
//!
//! GET /fetch-callback?vscode-requestId=R   (polled by the waiting page)
//!     → store.rs (take R: remove + return, at most once)
//! ```
//!
//! # Design Decisions
//! - The store is owned by the application state, not a global
//! - Bounded by capacity and TTL; expired entries are dropped lazily
//! - Take is a single map removal, so concurrent polls cannot both win

pub mod descriptor;
pub mod store;

use thiserror::Error;

pub use descriptor::{CallbackRegistration, RedirectDescriptor};
pub use store::CallbackStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    #[error("missing vscode-requestId parameter")]
    MissingRequestId,
}
