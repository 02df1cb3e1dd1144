//! One-shot scan of the extensions directory.

use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use serde_json::{json, Value};

use crate::extensions::manifest::{is_declared, ExtensionManifest};
use crate::extensions::DiscoveryError;
use crate::observability::metrics;

const PACKAGE_JSON: &str = "package.json";
const PACKAGE_NLS_JSON: &str = "package.nls.json";

/// A manifest plus the browser entry point that was declared but not found.
struct LoadedExtension {
    manifest: ExtensionManifest,
    unbuilt: Option<String>,
}

/// Scan every subdirectory of `root` and build the extension catalog.
///
/// Never fails: a problem with one folder is logged and skips that folder.
/// The result is ordered by folder name.
pub async fn discover_extensions(root: &Path) -> Vec<ExtensionManifest> {
    let folders = match list_folders(root).await {
        Ok(folders) => folders,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "Extensions directory unavailable");
            return Vec::new();
        }
    };

    let results = join_all(folders.iter().map(|name| load_extension(root, name))).await;

    let mut manifests = Vec::new();
    let mut unbuilt = Vec::new();
    for (name, result) in folders.iter().zip(results) {
        match result {
            Ok(Some(loaded)) => {
                unbuilt.extend(loaded.unbuilt);
                manifests.push(loaded.manifest);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(extension = %name, error = %e, "Skipping extension"),
        }
    }

    if !unbuilt.is_empty() {
        tracing::warn!(
            missing = %unbuilt.join(", "),
            "Could not find the following browser main files; build the extensions first"
        );
    }

    tracing::info!(count = manifests.len(), root = %root.display(), "Extensions discovered");
    metrics::record_extensions_discovered(manifests.len());
    manifests
}

async fn list_folders(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|source| DiscoveryError::ReadDir {
            path: root.to_path_buf(),
            source,
        })?;

    let mut folders = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|source| DiscoveryError::ReadDir {
        path: root.to_path_buf(),
        source,
    })? {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => folders.push(name),
            Err(name) => tracing::warn!(folder = ?name, "Skipping extension folder with non UTF-8 name"),
        }
    }
    folders.sort();
    Ok(folders)
}

async fn list_files(dir: &Path) -> Result<Vec<String>, DiscoveryError> {
    let read_dir_err = |source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// `readme`, `readme.md` or `readme.txt`, any case.
fn is_doc_file(name: &str, stem: &str) -> bool {
    let lower = name.to_lowercase();
    match lower.strip_prefix(stem) {
        Some(rest) => rest.is_empty() || rest == ".md" || rest == ".txt",
        None => false,
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn load_extension(
    root: &Path,
    folder: &str,
) -> Result<Option<LoadedExtension>, DiscoveryError> {
    let dir = root.join(folder);
    let children = list_files(&dir).await?;

    let doc_path = |stem: &str| {
        children
            .iter()
            .find(|name| is_doc_file(name, stem))
            .map(|name| format!("{folder}/{name}"))
    };
    let readme_path = doc_path("readme");
    let changelog_path = doc_path("changelog");

    let descriptor_path = dir.join(PACKAGE_JSON);
    if !exists(&descriptor_path).await {
        tracing::debug!(extension = %folder, "No package.json, skipping");
        return Ok(None);
    }

    let raw = tokio::fs::read(&descriptor_path)
        .await
        .map_err(|source| DiscoveryError::Read {
            path: descriptor_path.clone(),
            source,
        })?;
    let mut package_json: Value =
        serde_json::from_slice(&raw).map_err(|source| DiscoveryError::Parse {
            path: descriptor_path.clone(),
            source,
        })?;
    let Some(fields) = package_json.as_object_mut() else {
        return Err(DiscoveryError::NotAnObject(descriptor_path));
    };

    let has_browser = is_declared(fields.get("browser"));
    if is_declared(fields.get("main")) && !has_browser {
        tracing::info!(extension = %folder, "Native-only extension, not supported in the browser");
        return Ok(None);
    }

    let mut unbuilt = None;
    if has_browser {
        let browser = match fields.get("browser") {
            Some(Value::String(browser)) => browser.clone(),
            _ => return Err(DiscoveryError::InvalidBrowserEntry(descriptor_path)),
        };
        fields.insert("main".to_string(), Value::String(browser.clone()));

        let entry = browser_entry_file(&browser);
        if !exists(&dir.join(&entry)).await {
            unbuilt = Some(unbuilt_entry(folder, &entry));
        }
    }

    fields.insert("extensionKind".to_string(), json!(["web"]));

    let localization_path = if exists(&dir.join(PACKAGE_NLS_JSON)).await {
        Some(format!("{folder}/{PACKAGE_NLS_JSON}"))
    } else {
        None
    };

    Ok(Some(LoadedExtension {
        manifest: ExtensionManifest {
            folder_name: folder.to_string(),
            package_json,
            localization_path,
            readme_path,
            changelog_path,
        },
        unbuilt,
    }))
}

/// The file a browser entry resolves to: `.js` is appended unless already present.
fn browser_entry_file(browser: &str) -> PathBuf {
    let path = PathBuf::from(browser);
    if path.extension().and_then(|e| e.to_str()) == Some("js") {
        path
    } else {
        PathBuf::from(format!("{browser}.js"))
    }
}

/// Path of a missing entry file relative to the extensions root, for the warning.
fn unbuilt_entry(folder: &str, entry: &Path) -> String {
    let entry = entry.to_string_lossy();
    format!("{folder}/{}", entry.trim_start_matches("./"))
}
