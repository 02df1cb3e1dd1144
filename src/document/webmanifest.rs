//! Installable web app manifest served at `/manifest.json`.

use serde::Serialize;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebAppManifest {
    pub name: String,
    pub short_name: String,
    pub start_url: &'static str,
    pub lang: &'static str,
    pub display: &'static str,
}

impl WebAppManifest {
    pub fn from_config(app: &AppConfig) -> Self {
        Self {
            name: app.name.clone(),
            short_name: app.short_name.clone(),
            start_url: "/",
            lang: "en-US",
            display: "standalone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_manifest() {
        let manifest = WebAppManifest::from_config(&AppConfig::default());
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "name": "Code Web - OSS",
                "short_name": "Code Web - OSS",
                "start_url": "/",
                "lang": "en-US",
                "display": "standalone",
            })
        );
    }
}
