//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration for the workbench server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Externally visible origin used in absolute URLs.
    pub public: PublicConfig,

    /// On-disk locations of the application and its extensions.
    pub paths: PathsConfig,

    /// Callback relay settings.
    pub callback: CallbackConfig,

    /// Web app manifest metadata.
    pub app: AppConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// Address the TCP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }

    /// Authority embedded in absolute URLs; falls back to `host:port`.
    pub fn authority(&self) -> String {
        match &self.public.authority {
            Some(authority) if !authority.is_empty() => authority.clone(),
            _ => self.bind_address(),
        }
    }

    /// Absolute URL under which `/static-extension/` assets are reachable.
    pub fn static_extensions_url(&self) -> String {
        format!("{}://{}/static-extension", self.public.scheme, self.authority())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host name or address to bind.
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

/// Externally visible origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublicConfig {
    /// URI scheme (`http` or `https`).
    pub scheme: String,

    /// Authority override, e.g. when running behind a port forward.
    pub authority: Option<String>,
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            authority: None,
        }
    }
}

/// File system layout.
///
/// Every relative path except `app_root` resolves against `app_root`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Application root; `/static/` serves from here.
    pub app_root: PathBuf,

    /// Directory scanned for extensions; `/static-extension/` serves from here.
    pub extensions_dir: PathBuf,

    /// Workbench HTML template.
    pub template: PathBuf,

    /// Icon served at `/favicon.ico`.
    pub favicon: PathBuf,

    /// Page returned after a callback has been registered.
    pub callback_page: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("."),
            extensions_dir: PathBuf::from("extensions"),
            template: ["src", "vs", "code", "browser", "workbench", "workbench-dev.html"]
                .iter()
                .collect(),
            favicon: ["resources", "win32", "code.ico"].iter().collect(),
            callback_page: ["resources", "web", "callback.html"].iter().collect(),
        }
    }
}

impl PathsConfig {
    fn under_root(&self, path: &Path) -> PathBuf {
        self.app_root.join(path)
    }

    pub fn extensions_root(&self) -> PathBuf {
        self.under_root(&self.extensions_dir)
    }

    pub fn template_path(&self) -> PathBuf {
        self.under_root(&self.template)
    }

    pub fn favicon_path(&self) -> PathBuf {
        self.under_root(&self.favicon)
    }

    pub fn callback_page_path(&self) -> PathBuf {
        self.under_root(&self.callback_page)
    }
}

/// Callback relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CallbackConfig {
    /// Maximum number of pending registrations; the oldest is evicted beyond this.
    pub max_entries: usize,

    /// Seconds a registration stays retrievable.
    pub ttl_secs: u64,

    /// Scheme stored when a registration does not name one.
    pub url_protocol: String,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            ttl_secs: 300,
            url_protocol: "code-oss".to_string(),
        }
    }
}

/// Installable web app metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub short_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Code Web - OSS".to_string(),
            short_name: "Code Web - OSS".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_defaults_to_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.authority(), "localhost:8080");
        assert_eq!(
            config.static_extensions_url(),
            "http://localhost:8080/static-extension"
        );
    }

    #[test]
    fn test_authority_override() {
        let mut config = ServerConfig::default();
        config.public.scheme = "https".into();
        config.public.authority = Some("dev.example.com".into());
        assert_eq!(
            config.static_extensions_url(),
            "https://dev.example.com/static-extension"
        );
    }

    #[test]
    fn test_paths_resolve_against_app_root() {
        let mut paths = PathsConfig::default();
        paths.app_root = PathBuf::from("/srv/app");
        assert_eq!(paths.extensions_root(), PathBuf::from("/srv/app/extensions"));
        assert_eq!(
            paths.favicon_path(),
            PathBuf::from("/srv/app/resources/win32/code.ico")
        );

        paths.extensions_dir = PathBuf::from("/opt/ext");
        assert_eq!(paths.extensions_root(), PathBuf::from("/opt/ext"));
    }

    #[test]
    fn test_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            port = 3000

            [callback]
            ttl_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.host, "localhost");
        assert_eq!(config.callback.ttl_secs, 60);
        assert_eq!(config.callback.max_entries, 1024);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }
}
