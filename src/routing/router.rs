//! Route table and lookup.
//!
//! # Responsibilities
//! - Hold the fixed, ordered route table
//! - Resolve a request path to a route and the path remainder
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - First match wins, in declaration order
//! - Explicit no-match (`None`) rather than a silent default

use crate::routing::matcher::{ExactMatcher, Matcher, PathPrefixMatcher};

/// Every endpoint the server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Favicon,
    WebManifest,
    Static,
    StaticExtension,
    Root,
    Callback,
    FetchCallback,
}

impl Route {
    /// Stable label for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::Favicon => "favicon",
            Route::WebManifest => "manifest",
            Route::Static => "static",
            Route::StaticExtension => "static-extension",
            Route::Root => "root",
            Route::Callback => "callback",
            Route::FetchCallback => "fetch-callback",
        }
    }
}

/// A resolved route plus whatever followed a prefix match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: Route,
    pub remainder: &'a str,
}

/// Ordered route table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<(Box<dyn Matcher>, Route)>,
}

impl RouteTable {
    /// The server's fixed routes in precedence order.
    pub fn standard() -> Self {
        let routes: Vec<(Box<dyn Matcher>, Route)> = vec![
            (Box::new(ExactMatcher::new("/favicon.ico")), Route::Favicon),
            (Box::new(ExactMatcher::new("/manifest.json")), Route::WebManifest),
            (Box::new(PathPrefixMatcher::new("/static/")), Route::Static),
            (
                Box::new(PathPrefixMatcher::new("/static-extension/")),
                Route::StaticExtension,
            ),
            (Box::new(ExactMatcher::new("/")), Route::Root),
            (Box::new(ExactMatcher::new("/callback")), Route::Callback),
            (Box::new(ExactMatcher::new("/fetch-callback")), Route::FetchCallback),
        ];
        Self { routes }
    }

    /// Find the first route matching `path`.
    pub fn resolve<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes.iter().find_map(|(matcher, route)| {
            matcher.matches(path).map(|remainder| RouteMatch {
                route: *route,
                remainder,
            })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> Option<Route> {
        RouteTable::standard().resolve(path).map(|m| m.route)
    }

    #[test]
    fn test_exact_routes() {
        assert_eq!(route("/favicon.ico"), Some(Route::Favicon));
        assert_eq!(route("/manifest.json"), Some(Route::WebManifest));
        assert_eq!(route("/"), Some(Route::Root));
        assert_eq!(route("/callback"), Some(Route::Callback));
        assert_eq!(route("/fetch-callback"), Some(Route::FetchCallback));
    }

    #[test]
    fn test_prefix_routes_carry_remainder() {
        let table = RouteTable::standard();
        let m = table.resolve("/static-extension/foo/bar.js").unwrap();
        assert_eq!(m.route, Route::StaticExtension);
        assert_eq!(m.remainder, "foo/bar.js");

        let m = table.resolve("/static/out/vs/loader.js").unwrap();
        assert_eq!(m.route, Route::Static);
        assert_eq!(m.remainder, "out/vs/loader.js");
    }

    #[test]
    fn test_static_prefix_wins_over_exact_routes() {
        assert_eq!(route("/static/manifest.json"), Some(Route::Static));
        assert_eq!(route("/static/favicon.ico"), Some(Route::Static));
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(route("/static"), None);
        assert_eq!(route("/callback/extra"), None);
        assert_eq!(route("/index.html"), None);
        assert_eq!(route(""), None);
    }
}
