//! Configuration loading: defaults, file, environment, command line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Listening port.
pub const ENV_PORT: &str = "PORT";
/// Externally visible authority.
pub const ENV_AUTHORITY: &str = "VSCODE_AUTHORITY";
/// URI scheme for absolute URLs.
pub const ENV_SCHEME: &str = "VSCODE_SCHEME";

/// Values supplied on the command line. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<String>,
    pub app_root: Option<PathBuf>,
    pub extensions_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Load configuration from an optional TOML file, the process environment
/// and command line overrides, then validate it.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ServerConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => ServerConfig::default(),
    };
    build_config(config, |name| std::env::var(name).ok(), overrides)
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment and command line layers on top of `config`, pin the
/// application root to an absolute path and validate the result.
pub fn build_config<F>(
    mut config: ServerConfig,
    env: F,
    overrides: &ConfigOverrides,
) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env(&mut config, &env)?;
    apply_overrides(&mut config, overrides);

    // Containment checks compare against this path, so it must be canonical.
    if let Ok(root) = config.paths.app_root.canonicalize() {
        config.paths.app_root = root;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env<F>(config: &mut ServerConfig, env: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = env(ENV_PORT) {
        config.listener.port = port.parse().map_err(|_| ConfigError::Env {
            name: ENV_PORT,
            value: port.clone(),
        })?;
    }
    if let Some(authority) = env(ENV_AUTHORITY) {
        config.public.authority = Some(authority);
    }
    if let Some(scheme) = env(ENV_SCHEME) {
        config.public.scheme = scheme;
    }
    Ok(())
}

fn apply_overrides(config: &mut ServerConfig, overrides: &ConfigOverrides) {
    if let Some(host) = &overrides.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if let Some(scheme) = &overrides.scheme {
        config.public.scheme = scheme.clone();
    }
    if let Some(app_root) = &overrides.app_root {
        config.paths.app_root = app_root.clone();
    }
    if let Some(extensions_dir) = &overrides.extensions_dir {
        config.paths.extensions_dir = extensions_dir.clone();
    }
    if let Some(level) = &overrides.log_level {
        config.observability.log_level = level.clone();
    }
}
