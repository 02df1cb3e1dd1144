//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (raw, percent-encoded)
//!     → router.rs (ordered route table lookup)
//!     → matcher.rs (exact or prefix condition)
//!     → Return: Route + remainder, or no match (404)
//! ```
//!
//! # Precedence
//! `/favicon.ico` → `/manifest.json` → `/static/*` → `/static-extension/*`
//! → `/` → `/callback` → `/fetch-callback` → 404

pub mod matcher;
pub mod router;

pub use router::{Route, RouteMatch, RouteTable};
