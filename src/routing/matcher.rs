//! Path matching primitives.
//!
//! # Responsibilities
//! - Match a request path exactly
//! - Match a request path prefix and hand back the remainder
//!
//! # Design Decisions
//! - Paths are compared raw (still percent-encoded) and case-sensitively
//! - No regex, so matching cost is linear in the path length

/// Trait for matching request paths.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the unmatched remainder of `path` if it matches.
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str>;
}

/// Matches one path exactly; the remainder is always empty.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    path: &'static str,
}

impl ExactMatcher {
    pub fn new(path: &'static str) -> Self {
        Self { path }
    }
}

impl Matcher for ExactMatcher {
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        (path == self.path).then_some("")
    }
}

/// Matches a path prefix; the remainder is everything after it.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: &'static str,
}

impl PathPrefixMatcher {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix)
    }
}
