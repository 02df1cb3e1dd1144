//! Request path resolution and the root containment check.

use std::path::{Component, Path, PathBuf};

/// Join a decoded request path onto `root`, resolving `.` and `..` lexically.
///
/// Root and prefix components in `relative` are ignored so that a leading
/// slash cannot replace `root`. `..` may climb above `root`; callers decide
/// with [`is_within`] whether the result is acceptable.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    let mut resolved = normalize(root);
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved
}

/// Lexically normalize a path: drop `.`, fold `..` into its parent.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    normalized
}

/// True if `path` lies strictly inside `root`.
///
/// Comparison is per component, so `/srv/app-old` is not inside `/srv/app`,
/// and `root` itself is not inside `root`.
pub fn is_within(root: &Path, path: &Path) -> bool {
    let root = normalize(root);
    let path = normalize(path);
    path != root && path.starts_with(&root)
}
