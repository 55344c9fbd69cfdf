//! Configuration resolver trait for layered overrides.
//!
//! # Architecture
//!
//! ```text
//! ConfigLoader.load()  →  GuardConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     GuardConfig (final)  →  build_store()
//! ```
//!
//! # Example
//!
//! ```ignore
//! use youdu_runtime::config::{ConfigLoader, ConfigResolver, GuardConfig};
//!
//! struct CliOverrides {
//!     enabled: Option<bool>,
//! }
//!
//! impl ConfigResolver for CliOverrides {
//!     fn apply(&self, config: &mut GuardConfig) {
//!         if let Some(v) = self.enabled {
//!             config.permission_mut().enabled = Some(v);
//!         }
//!     }
//! }
//!
//! let mut config = ConfigLoader::new().load()?;
//! CliOverrides { enabled: Some(true) }.apply(&mut config);
//! ```

use super::GuardConfig;

/// Trait for applying configuration overrides.
///
/// Implementors can modify an existing config with their specific overrides.
/// This enables a clean separation between config loading (file/env) and
/// runtime overrides (CLI flags, programmatic settings).
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    ///
    /// Only non-None values should be applied, preserving existing values
    /// for unspecified options.
    fn apply(&self, config: &mut GuardConfig);
}

/// No-op resolver that makes no changes.
///
/// Useful as a default or for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut GuardConfig) {
        // No changes
    }
}
