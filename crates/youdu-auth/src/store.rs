//! Shared, thread-safe holder of the [`PermissionState`].
//!
//! One [`PolicyStore`] is built at process start and handed to every
//! request handler, typically as `Arc<PolicyStore>`.
//!
//! # Locking
//!
//! A single `RwLock` guards the whole state:
//!
//! | Operation | Lock |
//! |-----------|------|
//! | `check*`, `resource_policy`, `is_enabled`, `snapshot` | read (concurrent) |
//! | `set_resource_policy`, `enable`, `disable` | write (exclusive) |
//!
//! A policy is replaced as one value under the write lock, so a reader sees
//! either the old policy or the new one, never a mix.

use crate::{Action, PermissionDenied, PermissionState, Resource, ResourcePolicy};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// Thread-safe permission configuration with check entry points.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use std::sync::Arc;
/// use youdu_auth::{Action, PolicyStore, Resource, ResourcePolicy};
///
/// let store = Arc::new(PolicyStore::new(true, false, BTreeMap::new()));
/// assert!(store.check(Resource::User, Action::Read).is_err());
///
/// store.set_resource_policy(Resource::User, ResourcePolicy::full());
/// assert!(store.check(Resource::User, Action::Read).is_ok());
///
/// store.disable();
/// assert!(store.check(Resource::Group, Action::Delete).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct PolicyStore {
    state: RwLock<PermissionState>,
}

impl PolicyStore {
    /// Creates a store. If `enabled` is false, `allow_all` is forced true.
    #[must_use]
    pub fn new(
        enabled: bool,
        allow_all: bool,
        resources: BTreeMap<Resource, ResourcePolicy>,
    ) -> Self {
        if !enabled && !allow_all {
            debug!("permission system disabled, forcing allow_all");
        }
        Self::from_state(PermissionState::new(enabled, allow_all, resources))
    }

    /// Creates a store holding `state`.
    #[must_use]
    pub fn from_state(state: PermissionState) -> Self {
        debug!(
            enabled = state.enabled(),
            allow_all = state.allow_all(),
            resources = state.resources().len(),
            "permission store initialized"
        );
        Self {
            state: RwLock::new(state),
        }
    }

    // ─── Writers ─────────────────────────────────────────────────────

    /// Replaces the whole policy for `resource`, creating the entry if absent.
    pub fn set_resource_policy(&self, resource: Resource, policy: ResourcePolicy) {
        self.state.write().set_policy(resource, policy);
        debug!(%resource, "resource policy replaced");
    }

    /// Turns enforcement on and clears allow-all.
    pub fn enable(&self) {
        self.state.write().set_enabled(true);
        debug!("permission system enabled");
    }

    /// Turns enforcement off. Disabling always implies allow-all.
    pub fn disable(&self) {
        self.state.write().set_enabled(false);
        debug!("permission system disabled");
    }

    // ─── Readers ─────────────────────────────────────────────────────

    /// Returns a copy of the policy for `resource`, or `None` if unconfigured.
    #[must_use]
    pub fn resource_policy(&self, resource: Resource) -> Option<ResourcePolicy> {
        self.state.read().policy(resource).cloned()
    }

    /// Returns `true` if enforcement is on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled()
    }

    /// Returns `true` if every check currently succeeds.
    #[must_use]
    pub fn is_allow_all(&self) -> bool {
        self.state.read().allow_all()
    }

    /// Returns a consistent copy of the entire state.
    #[must_use]
    pub fn snapshot(&self) -> PermissionState {
        self.state.read().clone()
    }

    // ─── Checks ──────────────────────────────────────────────────────

    /// See [`PermissionState::check`].
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if the action is refused.
    pub fn check(&self, resource: Resource, action: Action) -> Result<(), PermissionDenied> {
        self.state.read().check(resource, action)
    }

    /// See [`PermissionState::check_with_id`].
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if the action or identifier is refused.
    pub fn check_with_id(
        &self,
        resource: Resource,
        action: Action,
        resource_id: &str,
    ) -> Result<(), PermissionDenied> {
        self.state.read().check_with_id(resource, action, resource_id)
    }

    /// See [`PermissionState::check_message_send`].
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if the send or any recipient is refused.
    pub fn check_message_send(
        &self,
        to_users: &str,
        to_departments: &str,
    ) -> Result<(), PermissionDenied> {
        self.state
            .read()
            .check_message_send(to_users, to_departments)
    }
}

impl From<PermissionState> for PolicyStore {
    fn from(state: PermissionState) -> Self {
        Self::from_state(state)
    }
}
