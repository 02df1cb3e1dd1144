//! Root document rendering.

use std::path::PathBuf;

use serde::Serialize;

use crate::document::template;
use crate::extensions::{ExtensionCatalog, ExtensionManifest};
use crate::http::response::ServeError;

/// Query parameter naming a folder in the remote content provider.
pub const SOURCE_PATH_PARAM: &str = "gh";

const REMOTE_SCHEME: &str = "github";
const REMOTE_AUTHORITY: &str = "HEAD";
const SAMPLE_SCHEME: &str = "memfs";
const SAMPLE_FOLDER: &str = "/sample-folder";

/// The folder the workbench opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderUri {
    pub scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    pub path: String,
}

impl FolderUri {
    /// A folder in the remote content provider; the path is rooted if it is not already.
    pub fn remote(path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            scheme: REMOTE_SCHEME.to_string(),
            authority: Some(REMOTE_AUTHORITY.to_string()),
            path,
        }
    }

    /// The built-in in-memory sample folder.
    pub fn sample() -> Self {
        Self {
            scheme: SAMPLE_SCHEME.to_string(),
            authority: None,
            path: SAMPLE_FOLDER.to_string(),
        }
    }
}

/// Per-session configuration embedded in the root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchConfiguration {
    pub folder_uri: FolderUri,
    pub static_extensions_url: String,
}

impl WorkbenchConfiguration {
    /// Pick the folder from the `gh` parameter, falling back to the sample folder.
    pub fn from_query(params: &[(String, String)], static_extensions_url: &str) -> Self {
        let folder_uri = params
            .iter()
            .find(|(key, _)| key == SOURCE_PATH_PARAM)
            .map(|(_, value)| value.as_str())
            .filter(|path| !path.is_empty())
            .map_or_else(FolderUri::sample, FolderUri::remote);
        Self {
            folder_uri,
            static_extensions_url: static_extensions_url.to_string(),
        }
    }
}

/// Substitute the configuration and catalog into a template.
pub fn render_document(
    template_source: &str,
    configuration: &WorkbenchConfiguration,
    extensions: &[ExtensionManifest],
) -> Result<String, serde_json::Error> {
    let configuration = template::escape_attribute(&serde_json::to_string(configuration)?);
    let extensions = template::escape_attribute(&serde_json::to_string(extensions)?);
    Ok(template::fill(template_source, &configuration, &extensions))
}

/// Renders `/` from the on-disk template and the extension catalog.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    template_path: PathBuf,
    static_extensions_url: String,
    catalog: ExtensionCatalog,
}

impl DocumentAssembler {
    pub fn new(
        template_path: PathBuf,
        static_extensions_url: String,
        catalog: ExtensionCatalog,
    ) -> Self {
        Self {
            template_path,
            static_extensions_url,
            catalog,
        }
    }

    /// Render the root document for one request.
    ///
    /// The template is re-read per request so edits show up on reload.
    pub async fn render_root(&self, params: &[(String, String)]) -> Result<String, ServeError> {
        let configuration = WorkbenchConfiguration::from_query(params, &self.static_extensions_url);
        let extensions = self.catalog.get().await;
        let template_source = tokio::fs::read_to_string(&self.template_path)
            .await
            .map_err(ServeError::Template)?;
        Ok(render_document(&template_source, &configuration, &extensions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "http://localhost:8080/static-extension";

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_gh_param_selects_remote_folder() {
        let config = WorkbenchConfiguration::from_query(&params(&[("gh", "owner/repo/path")]), URL);
        assert_eq!(
            config.folder_uri,
            FolderUri {
                scheme: "github".into(),
                authority: Some("HEAD".into()),
                path: "/owner/repo/path".into(),
            }
        );
    }

    #[test]
    fn test_rooted_gh_param_is_kept() {
        let config = WorkbenchConfiguration::from_query(&params(&[("gh", "/owner/repo")]), URL);
        assert_eq!(config.folder_uri.path, "/owner/repo");
    }

    #[test]
    fn test_missing_or_empty_gh_selects_sample() {
        for query in [params(&[]), params(&[("gh", "")]), params(&[("other", "x")])] {
            let config = WorkbenchConfiguration::from_query(&query, URL);
            assert_eq!(config.folder_uri, FolderUri::sample());
        }
    }

    #[test]
    fn test_configuration_json_shape() {
        let config = WorkbenchConfiguration::from_query(&[], URL);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "folderUri": {"scheme": "memfs", "path": "/sample-folder"},
                "staticExtensionsUrl": URL,
            })
        );
    }

    #[test]
    fn test_render_document_escapes_quotes() {
        let extensions = vec![ExtensionManifest {
            folder_name: "ext".into(),
            package_json: json!({"name": "cost$1"}),
            localization_path: None,
            readme_path: None,
            changelog_path: None,
        }];
        let config = WorkbenchConfiguration::from_query(&[], URL);
        let doc = render_document(
            "<a c=\"{{WORKBENCH_WEB_CONFIGURATION}}\" e=\"{{WORKBENCH_BUILTIN_EXTENSIONS}}\">",
            &config,
            &extensions,
        )
        .unwrap();

        assert!(doc.contains("c=\"{&quot;folderUri&quot;:"));
        assert!(doc.contains(
            "e=\"[{&quot;extensionPath&quot;:&quot;ext&quot;,&quot;packageJSON&quot;:{&quot;name&quot;:&quot;cost$1&quot;}}]\""
        ));
    }

    #[tokio::test]
    async fn test_render_root_reads_template() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("workbench.html");
        std::fs::write(&template_path, "<x d=\"{{WORKBENCH_WEB_CONFIGURATION}}\">").unwrap();

        let assembler = DocumentAssembler::new(
            template_path,
            URL.to_string(),
            ExtensionCatalog::ready(Vec::new()),
        );
        let doc = assembler
            .render_root(&params(&[("gh", "owner/repo/path")]))
            .await
            .unwrap();
        assert!(doc.contains("&quot;path&quot;:&quot;/owner/repo/path&quot;"));
    }

    #[tokio::test]
    async fn test_missing_template_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = DocumentAssembler::new(
            dir.path().join("missing.html"),
            URL.to_string(),
            ExtensionCatalog::ready(Vec::new()),
        );
        let err = assembler.render_root(&[]).await.unwrap_err();
        assert!(matches!(err, ServeError::Template(_)));
    }
}
