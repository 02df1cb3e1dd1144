//! HTTP surface of the workbench server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID, query parsing)
//!     → routing::RouteTable (which subsystem answers)
//!     → workbench.rs / callback.rs (handlers)
//!     → response.rs (error to status mapping)
//!     → Send to client
//! ```

pub mod callback;
pub mod request;
pub mod response;
pub mod server;
pub mod workbench;

pub use request::X_REQUEST_ID;
pub use response::ServeError;
pub use server::{AppState, HttpServer};
