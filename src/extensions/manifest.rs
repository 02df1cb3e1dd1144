//! Catalog entries for discovered extensions.

use serde::Serialize;
use serde_json::Value;

/// One browser-executable extension, as handed to the workbench.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionManifest {
    /// Folder name under the extensions root. Unique within a catalog.
    #[serde(rename = "extensionPath")]
    pub folder_name: String,

    /// The extension's `package.json`, normalized for the browser.
    #[serde(rename = "packageJSON")]
    pub package_json: Value,

    /// `<folder>/package.nls.json`, present only if the file exists.
    #[serde(rename = "packageNLSPath", skip_serializing_if = "Option::is_none")]
    pub localization_path: Option<String>,

    #[serde(rename = "readmePath", skip_serializing_if = "Option::is_none")]
    pub readme_path: Option<String>,

    #[serde(rename = "changelogPath", skip_serializing_if = "Option::is_none")]
    pub changelog_path: Option<String>,
}

/// JavaScript truthiness of a descriptor field.
pub(crate) fn is_declared(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_field_names() {
        let manifest = ExtensionManifest {
            folder_name: "theme-red".into(),
            package_json: json!({"name": "theme-red"}),
            localization_path: Some("theme-red/package.nls.json".into()),
            readme_path: None,
            changelog_path: Some("theme-red/CHANGELOG.md".into()),
        };
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "extensionPath": "theme-red",
                "packageJSON": {"name": "theme-red"},
                "packageNLSPath": "theme-red/package.nls.json",
                "changelogPath": "theme-red/CHANGELOG.md",
            })
        );
    }

    #[test]
    fn test_is_declared() {
        let doc = json!({"a": "x", "b": "", "c": null, "d": false, "e": 0, "f": {}});
        assert!(is_declared(doc.get("a")));
        assert!(!is_declared(doc.get("b")));
        assert!(!is_declared(doc.get("c")));
        assert!(!is_declared(doc.get("d")));
        assert!(!is_declared(doc.get("e")));
        assert!(is_declared(doc.get("f")));
        assert!(!is_declared(doc.get("missing")));
    }
}
