//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Config file(s):
//!    - explicit file (`with_config_file` or `YOUDU_CONFIG_FILE`), exclusively; or
//!    - global config (`~/.youdu/config.toml`), then project config
//!      (`<project>/config.toml`)
//! 3. Environment variables (`YOUDU_*`)
//!
//! Each layer overrides the previous.

use super::{default_config_path, ConfigError, GuardConfig, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use youdu_auth::{Action, PolicyStore, Resource};

/// Environment variable naming an explicit config file.
pub const CONFIG_FILE_ENV: &str = "YOUDU_CONFIG_FILE";

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($target:expr, $var:expr) => {
        if let Ok(val) = std::env::var($var) {
            $target = Some(
                parse_bool(&val)
                    .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?,
            );
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```ignore
/// use youdu_runtime::config::ConfigLoader;
///
/// let store = ConfigLoader::new()
///     .with_config_file("/etc/youdu/config.toml")
///     .skip_env_vars()  // For testing
///     .load_store()?;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit config file. When set, global and project configs are not read.
    config_file: Option<PathBuf>,

    /// Global config file path (defaults to ~/.youdu/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,

    /// Skip global config loading.
    skip_global: bool,

    /// Skip project config loading.
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_file: None,
            global_config_path: None,
            project_root: None,
            skip_env: false,
            skip_global: false,
            skip_project: false,
        }
    }

    /// Reads exactly this file instead of the global/project pair.
    ///
    /// Unlike the search locations, a missing explicit file is an error.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading, including `YOUDU_CONFIG_FILE`.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be parsed,
    /// an explicit config file cannot be read, or an environment variable
    /// holds an invalid value. Missing search-path files are ignored.
    pub fn load(&self) -> Result<GuardConfig, ConfigError> {
        // Start with defaults
        let mut config = GuardConfig::default();

        let explicit = self.config_file.clone().or_else(|| {
            if self.skip_env {
                None
            } else {
                std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from)
            }
        });

        if let Some(path) = explicit {
            // Layer 1 (exclusive): explicit file
            let file_config = self.read_file(&path)?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(&file_config);
        } else {
            // Layer 1a: Global config
            if !self.skip_global {
                let global_path = self
                    .global_config_path
                    .clone()
                    .unwrap_or_else(default_config_path);

                if let Some(global_config) = self.load_file(&global_path)? {
                    debug!(path = %global_path.display(), "Loaded global config");
                    config.merge(&global_config);
                }
            }

            // Layer 1b: Project config
            if !self.skip_project {
                let project_root = self
                    .project_root
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."));
                let project_config_path = project_root.join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = self.load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        // Layer 2: Environment variables
        if !self.skip_env {
            self.apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads configuration and builds the shared policy store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on any load failure or unknown resource key.
    pub fn load_store(&self) -> Result<Arc<PolicyStore>, ConfigError> {
        let config = self.load()?;
        config.build_store().map(Arc::new)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<GuardConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        self.read_file(path).map(Some)
    }

    /// Reads and parses a config file that must exist.
    fn read_file(&self, path: &Path) -> Result<GuardConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        GuardConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))
    }

    /// Applies environment variable overrides.
    ///
    /// Permission variables create the `[permission]` section if needed;
    /// a resource variable creates that resource's entry with all other
    /// actions denied.
    fn apply_env_vars(&self, config: &mut GuardConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("YOUDU_LOG_LEVEL") {
            config.logging.level = val;
        }

        let mut enabled = None;
        let mut allow_all = None;
        parse_env_bool!(enabled, "YOUDU_PERMISSION_ENABLED");
        parse_env_bool!(allow_all, "YOUDU_PERMISSION_ALLOW_ALL");

        if enabled.is_some() {
            config.permission_mut().enabled = enabled;
        }
        if allow_all.is_some() {
            config.permission_mut().allow_all = allow_all;
        }

        for resource in Resource::ALL {
            for action in Action::ALL {
                let var = resource_env_var(resource, action);
                let mut allowed = None;
                parse_env_bool!(allowed, var.as_str());
                if let Some(allowed) = allowed {
                    config
                        .permission_mut()
                        .resource_mut(resource)
                        .set(action, allowed);
                }
            }
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the variable overriding one action flag,
/// e.g. `YOUDU_PERMISSION_RESOURCES_USER_READ`.
#[must_use]
pub fn resource_env_var(resource: Resource, action: Action) -> String {
    format!(
        "YOUDU_PERMISSION_RESOURCES_{}_{}",
        resource.as_str().to_uppercase(),
        action.as_str().to_uppercase()
    )
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
