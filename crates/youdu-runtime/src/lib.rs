//! YouDu Runtime - configuration layer for the permission engine.
//!
//! Turns layered configuration (defaults, TOML files, `YOUDU_*` environment
//! variables, CLI overrides) into the single shared
//! [`PolicyStore`](youdu_auth::PolicyStore) that every request handler checks
//! against.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  youdu-auth    : Resource, Action, ResourcePolicy,   │
//! │                  PolicyStore, PermissionDenied       │
//! └──────────────────────────────────────────────────────┘
//!                           ↓
//! ┌──────────────────────────────────────────────────────┐
//! │  youdu-runtime (THIS CRATE)                           │
//! │  config/ : ConfigLoader, GuardConfig, ConfigResolver │
//! └──────────────────────────────────────────────────────┘
//!                           ↓
//! ┌──────────────────────────────────────────────────────┐
//! │  youdu-cli     : permission status / list / check    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use youdu_runtime::config::ConfigLoader;
//!
//! let store = ConfigLoader::new().load_store()?;
//! store.check(Resource::User, Action::Read)?;
//! ```

pub mod config;

pub use config::{ConfigError, ConfigLoader, ConfigResolver, GuardConfig, PermissionConfig};

// Re-export the engine for convenience
pub use youdu_auth::{
    Action, AllowSend, DenialKind, PermissionDenied, PermissionState, PolicyStore, Resource,
    ResourcePolicy,
};
