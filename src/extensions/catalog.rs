//! Lazily awaited handle to the discovery result.

use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::extensions::discovery::discover_extensions;
use crate::extensions::manifest::ExtensionManifest;

/// The extension catalog, shared by every request that needs it.
///
/// Discovery starts as soon as the catalog is spawned; awaiting [`get`](Self::get)
/// suspends only the calling request until the scan has finished.
#[derive(Clone)]
pub struct ExtensionCatalog {
    manifests: Shared<BoxFuture<'static, Arc<[ExtensionManifest]>>>,
}

impl ExtensionCatalog {
    /// Start scanning `root` on the runtime. Must be called from within Tokio.
    pub fn spawn(root: PathBuf) -> Self {
        let scan = tokio::spawn(async move { discover_extensions(&root).await });
        let manifests = async move {
            let manifests: Arc<[ExtensionManifest]> = match scan.await {
                Ok(manifests) => Arc::from(manifests),
                Err(e) => {
                    tracing::error!(error = %e, "Extension discovery task failed");
                    Arc::from(Vec::new())
                }
            };
            manifests
        };
        Self {
            manifests: manifests.boxed().shared(),
        }
    }

    /// A catalog that is already complete.
    pub fn ready(manifests: Vec<ExtensionManifest>) -> Self {
        let manifests: Arc<[ExtensionManifest]> = Arc::from(manifests);
        Self {
            manifests: futures_util::future::ready(manifests).boxed().shared(),
        }
    }

    pub async fn get(&self) -> Arc<[ExtensionManifest]> {
        self.manifests.clone().await
    }
}

impl std::fmt::Debug for ExtensionCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionCatalog")
            .field("ready", &self.manifests.peek().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawned_catalog_resolves_once_for_all_callers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ext")).unwrap();
        std::fs::write(dir.path().join("ext/package.json"), "{}").unwrap();

        let catalog = ExtensionCatalog::spawn(dir.path().to_path_buf());
        let other = catalog.clone();
        let (a, b) = tokio::join!(catalog.get(), other.get());
        assert_eq!(a.len(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_ready_catalog() {
        let catalog = ExtensionCatalog::ready(Vec::new());
        assert!(catalog.get().await.is_empty());
    }
}
