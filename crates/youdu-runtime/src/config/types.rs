//! Configuration types.
//!
//! File form of the configuration. Every section is optional; layers are
//! combined with [`GuardConfig::merge`] and the permission section is turned
//! into a live [`PolicyStore`] by [`PermissionConfig::build_store`].

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;
use youdu_auth::{PolicyStore, Resource, ResourcePolicy};

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use youdu_runtime::config::GuardConfig;
///
/// let config = GuardConfig::from_toml(r#"
/// [permission]
/// enabled = true
///
/// [permission.resources.user]
/// read = true
/// "#).unwrap();
///
/// let store = config.build_store().unwrap();
/// assert!(store.is_enabled());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Permission section. `None` when no layer provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionConfig>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values present in `other` override values in `self`. Resource
    /// policies are replaced whole, never merged field by field.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref other_perm) = other.permission {
            self.permission
                .get_or_insert_with(PermissionConfig::default)
                .merge(other_perm);
        }
        self.logging.merge(&other.logging);
    }

    /// Returns the permission section, creating an empty one if absent.
    pub fn permission_mut(&mut self) -> &mut PermissionConfig {
        self.permission.get_or_insert_with(PermissionConfig::default)
    }

    /// Builds the policy store described by this configuration.
    ///
    /// Without a permission section the system is inert: disabled, with
    /// every resource fully permitted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] for an unrecognised resource key.
    pub fn build_store(&self) -> Result<PolicyStore, ConfigError> {
        match self.permission {
            Some(ref perm) => perm.build_store(),
            None => {
                info!("no permission section configured, permission checks disabled");
                PermissionConfig::permissive().build_store()
            }
        }
    }
}

/// The `[permission]` section.
///
/// ```toml
/// [permission]
/// enabled = true
/// allow_all = false
///
/// [permission.resources.user]
/// read = true
/// allowlist = ["10232"]
///
/// [permission.resources.message]
/// create = true
/// allowsend = { users = ["10232", "8891"], dept = ["1"] }
/// ```
///
/// `enabled` and `allow_all` default to `false` when the section exists.
/// A resource without a table is not configured and denies every action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PermissionConfig {
    /// Enforce checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Allow every operation regardless of policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_all: Option<bool>,

    /// Policies keyed by resource name.
    pub resources: BTreeMap<String, ResourcePolicy>,
}

impl PermissionConfig {
    /// Disabled, with every resource fully permitted.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            enabled: Some(false),
            allow_all: Some(true),
            resources: Resource::ALL
                .into_iter()
                .map(|r| (r.as_str().to_string(), ResourcePolicy::full()))
                .collect(),
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.allow_all.is_some() {
            self.allow_all = other.allow_all;
        }
        for (key, policy) in &other.resources {
            self.resources.insert(key.clone(), policy.clone());
        }
    }

    /// Returns the policy entry for `resource`, creating a deny-all one if absent.
    pub fn resource_mut(&mut self, resource: Resource) -> &mut ResourcePolicy {
        self.resources
            .entry(resource.as_str().to_string())
            .or_default()
    }

    /// Validates resource keys and returns typed policies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] for an unrecognised key.
    pub fn typed_resources(&self) -> Result<BTreeMap<Resource, ResourcePolicy>, ConfigError> {
        self.resources
            .iter()
            .map(|(key, policy)| {
                key.parse::<Resource>()
                    .map(|resource| (resource, policy.clone()))
                    .map_err(|_| ConfigError::unknown_resource(key))
            })
            .collect()
    }

    /// Builds a [`PolicyStore`]. A disabled configuration is forced to allow-all.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] for an unrecognised key.
    pub fn build_store(&self) -> Result<PolicyStore, ConfigError> {
        Ok(PolicyStore::new(
            self.enabled.unwrap_or(false),
            self.allow_all.unwrap_or(false),
            self.typed_resources()?,
        ))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when neither CLI flags nor `RUST_LOG` choose one.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl LoggingConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.level != default.level {
            self.level.clone_from(&other.level);
        }
    }
}
