//! Configuration management for the notes site.
//!
//! Parses `notes.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Programmatic overrides can be applied during load via [`Overrides`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.root_dir`
//! - `routes.prefix`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override content root directory.
    pub root_dir: Option<PathBuf>,
    /// Override route prefix.
    pub route_prefix: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "notes.toml";

/// Default content directory, relative to the config file.
const DEFAULT_ROOT_DIR: &str = "content";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Route configuration.
    pub routes: RoutesConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding the markdown tree.
    pub root_dir: PathBuf,
}

/// Route configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// URL prefix for note pages (e.g. `/notes`).
    pub prefix: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            prefix: "/notes".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root_dir`").
        field: String,
        /// Error message (e.g., "${`NOTES_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `notes.toml` in current directory and parents.
    ///
    /// Overrides are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Content root directory.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.content_resolved.root_dir
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(root_dir) = &overrides.root_dir {
            self.content_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(prefix) = &overrides.route_prefix {
            self.routes.prefix.clone_from(prefix);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            routes: RoutesConfig::default(),
            content_resolved: ContentConfig {
                root_dir: base.join(DEFAULT_ROOT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.routes.prefix;
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "routes.prefix must start with /".to_owned(),
            ));
        }
        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "routes.prefix must not end with /".to_owned(),
            ));
        }
        if self.content_resolved.root_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content.root_dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root_dir) = self.content.root_dir {
            self.content.root_dir = Some(expand::expand_env(root_dir, "content.root_dir")?);
        }
        self.routes.prefix = expand::expand_env(&self.routes.prefix, "routes.prefix")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let root_dir = self.content.root_dir.as_deref().unwrap_or(DEFAULT_ROOT_DIR);
        if root_dir.is_empty() {
            return Err(ConfigError::Validation(
                "content.root_dir cannot be empty".to_owned(),
            ));
        }

        self.content_resolved = ContentConfig {
            root_dir: config_dir.join(root_dir),
        };
        Ok(())
    }
}
