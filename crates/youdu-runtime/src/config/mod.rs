//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. Resolver overrides (CLI flags)          │  Runtime override
//! ├─────────────────────────────────────────────┤
//! │  2. Environment Variables (YOUDU_*)         │  Deployment override
//! ├─────────────────────────────────────────────┤
//! │  3. Project Config (./config.toml)          │  Project-specific
//! ├─────────────────────────────────────────────┤
//! │  4. Global Config (~/.youdu/config.toml)    │  User defaults
//! ├─────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)           │  Fallback
//! └─────────────────────────────────────────────┘
//! ```
//!
//! An explicit file (`--config` / `YOUDU_CONFIG_FILE`) replaces layers 3-4.
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `YOUDU_CONFIG_FILE` | (file to read) | PathBuf |
//! | `YOUDU_LOG_LEVEL` | `logging.level` | String |
//! | `YOUDU_PERMISSION_ENABLED` | `permission.enabled` | bool |
//! | `YOUDU_PERMISSION_ALLOW_ALL` | `permission.allow_all` | bool |
//! | `YOUDU_PERMISSION_RESOURCES_<RES>_<ACTION>` | `permission.resources.<res>.<action>` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! # ./config.toml
//!
//! [logging]
//! level = "info"
//!
//! [permission]
//! enabled = true
//! allow_all = false
//!
//! [permission.resources.dept]
//! read = true
//!
//! [permission.resources.user]
//! read = true
//! update = true
//! allowlist = ["10232", "10023"]
//!
//! [permission.resources.message]
//! create = true
//! allowsend = { users = ["10232", "8891"], dept = ["1"] }
//! ```
//!
//! Without any `[permission]` section the permission system is disabled
//! and every resource is fully permitted.

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::{resource_env_var, ConfigLoader, CONFIG_FILE_ENV};
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{GuardConfig, LoggingConfig, PermissionConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".youdu")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
