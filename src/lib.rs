//! Local development server for the browser-hosted workbench.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Content
pub mod callback;
pub mod document;
pub mod extensions;
pub mod files;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
