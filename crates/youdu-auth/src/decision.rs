//! The decision procedure.
//!
//! [`PermissionState`] is the complete configuration at one instant. All
//! checks are pure functions of a state value; [`PolicyStore`](crate::PolicyStore)
//! only decides *which* state a caller sees.
//!
//! # Order of Evaluation
//!
//! ```text
//! 1. !enabled || allow_all          → allow
//! 2. resource has no policy         → ResourceNotConfigured
//! 3. policy flag for action false   → ActionNotPermitted
//! 4. id non-empty, allowlist set,
//!    id not a member                → IdentifierNotAllowed
//! 5.                                → allow
//! ```
//!
//! Sends run steps 1-3 for `(Message, Create)` and then test each
//! recipient token against `allowsend`, users before departments.

use crate::{Action, PermissionDenied, RecipientKind, RecipientList, Resource, ResourcePolicy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Process-wide permission configuration.
///
/// Whenever `enabled` is false, `allow_all` is true. Constructors and
/// mutators uphold this; there is no way to observe a disabled state
/// that partially denies.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use youdu_auth::{Action, DenialKind, PermissionState, Resource, ResourcePolicy};
///
/// let mut resources = BTreeMap::new();
/// resources.insert(Resource::User, ResourcePolicy {
///     read: true,
///     allowlist: vec!["a".into(), "b".into()],
///     ..Default::default()
/// });
/// let state = PermissionState::new(true, false, resources);
///
/// assert!(state.check_with_id(Resource::User, Action::Read, "a").is_ok());
/// let err = state.check_with_id(Resource::User, Action::Read, "c").unwrap_err();
/// assert_eq!(err.kind(), DenialKind::IdentifierNotAllowed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionState {
    enabled: bool,
    allow_all: bool,
    resources: BTreeMap<Resource, ResourcePolicy>,
}

/// Disabled, with no policies.
impl Default for PermissionState {
    fn default() -> Self {
        Self::new(false, true, BTreeMap::new())
    }
}

impl PermissionState {
    /// Creates a state. A disabled state is forced to allow-all.
    #[must_use]
    pub fn new(
        enabled: bool,
        allow_all: bool,
        resources: BTreeMap<Resource, ResourcePolicy>,
    ) -> Self {
        Self {
            enabled,
            allow_all: allow_all || !enabled,
            resources,
        }
    }

    /// Returns `true` if checks are enforced at all.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if every check trivially succeeds.
    #[must_use]
    pub fn allow_all(&self) -> bool {
        self.allow_all
    }

    /// Returns the configured policies, ordered by resource.
    #[must_use]
    pub fn resources(&self) -> &BTreeMap<Resource, ResourcePolicy> {
        &self.resources
    }

    /// Returns the policy for `resource`, if configured.
    #[must_use]
    pub fn policy(&self, resource: Resource) -> Option<&ResourcePolicy> {
        self.resources.get(&resource)
    }

    pub(crate) fn set_policy(&mut self, resource: Resource, policy: ResourcePolicy) {
        self.resources.insert(resource, policy);
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.allow_all = !enabled;
    }

    /// Action-only check. Equivalent to [`check_with_id`](Self::check_with_id)
    /// with an empty identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if the resource is unconfigured or the
    /// action is not permitted.
    pub fn check(&self, resource: Resource, action: Action) -> Result<(), PermissionDenied> {
        self.check_with_id(resource, action, "")
    }

    /// Action check followed by the row-level allow list.
    ///
    /// An empty `resource_id` skips the allow list. Which call sites pass an
    /// identifier is the caller's decision; the list applies to any action
    /// that carries one.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] describing the first failed step.
    pub fn check_with_id(
        &self,
        resource: Resource,
        action: Action,
        resource_id: &str,
    ) -> Result<(), PermissionDenied> {
        let Some(policy) = self.gate(resource, action)? else {
            return Ok(());
        };

        if !resource_id.is_empty() && !policy.permits_id(resource_id) {
            return Err(PermissionDenied::IdentifierNotAllowed {
                resource,
                id: resource_id.to_string(),
            });
        }

        Ok(())
    }

    /// Checks a send addressed to `|`-delimited user and department lists.
    ///
    /// The send is first gated by `Create` on [`Resource::Message`]; that
    /// denial is returned unchanged. Then each user token, in input order,
    /// must be in `allowsend.users` (if set), and likewise each department
    /// token in `allowsend.dept`. The first offending token is reported.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied::RecipientNotAllowed`] naming the first
    /// rejected token, or the gate denial.
    pub fn check_message_send(
        &self,
        to_users: &str,
        to_departments: &str,
    ) -> Result<(), PermissionDenied> {
        let Some(policy) = self.gate(Resource::Message, Action::Create)? else {
            return Ok(());
        };

        let users = RecipientList::parse(to_users);
        let departments = RecipientList::parse(to_departments);

        if let Some(token) = users.first_outside(&policy.allowsend.users) {
            return Err(PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::User,
                token: token.to_string(),
            });
        }

        if let Some(token) = departments.first_outside(&policy.allowsend.dept) {
            return Err(PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::Department,
                token: token.to_string(),
            });
        }

        Ok(())
    }

    /// Steps 1-3: bypass, lookup, action flag.
    ///
    /// Returns `Ok(None)` when the bypass applies, otherwise the policy
    /// that permitted the action.
    fn gate(
        &self,
        resource: Resource,
        action: Action,
    ) -> Result<Option<&ResourcePolicy>, PermissionDenied> {
        if !self.enabled || self.allow_all {
            return Ok(None);
        }

        let policy = self
            .resources
            .get(&resource)
            .ok_or(PermissionDenied::ResourceNotConfigured { resource })?;

        if !policy.allows(action) {
            return Err(PermissionDenied::ActionNotPermitted { resource, action });
        }

        Ok(Some(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AllowSend, DenialKind};

    fn state_with(resource: Resource, policy: ResourcePolicy) -> PermissionState {
        PermissionState::new(true, false, BTreeMap::from([(resource, policy)]))
    }

    fn message_state(users: &[&str], dept: &[&str]) -> PermissionState {
        state_with(
            Resource::Message,
            ResourcePolicy {
                create: true,
                allowsend: AllowSend {
                    users: users.iter().map(|s| s.to_string()).collect(),
                    dept: dept.iter().map(|s| s.to_string()).collect(),
                },
                ..Default::default()
            },
        )
    }

    fn kind_of(result: Result<(), PermissionDenied>) -> DenialKind {
        result.expect_err("expected denial").kind()
    }

    // ─── Construction ────────────────────────────────────────────────

    #[test]
    fn disabled_forces_allow_all() {
        let state = PermissionState::new(false, false, BTreeMap::new());
        assert!(!state.enabled());
        assert!(state.allow_all());
    }

    #[test]
    fn default_is_disabled_allow_all() {
        let state = PermissionState::default();
        assert!(!state.enabled());
        assert!(state.allow_all());
        assert!(state.resources().is_empty());
    }

    #[test]
    fn enabled_keeps_requested_allow_all() {
        assert!(!PermissionState::new(true, false, BTreeMap::new()).allow_all());
        assert!(PermissionState::new(true, true, BTreeMap::new()).allow_all());
    }

    #[test]
    fn set_enabled_toggles_allow_all() {
        let mut state = PermissionState::new(true, true, BTreeMap::new());
        state.set_enabled(true);
        assert!(!state.allow_all());
        state.set_enabled(false);
        assert!(state.allow_all());
    }

    // ─── Bypass ──────────────────────────────────────────────────────

    #[test]
    fn disabled_allows_everything() {
        let state = PermissionState::new(false, false, BTreeMap::new());
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(state.check(resource, action).is_ok());
                assert!(state.check_with_id(resource, action, "99999").is_ok());
            }
        }
        assert!(state.check_message_send("anyone", "anywhere").is_ok());
    }

    #[test]
    fn allow_all_overrides_denying_policy() {
        let state = PermissionState::new(
            true,
            true,
            BTreeMap::from([(
                Resource::User,
                ResourcePolicy {
                    allowlist: vec!["10232".into()],
                    ..Default::default()
                },
            )]),
        );
        assert!(state
            .check_with_id(Resource::User, Action::Read, "99999")
            .is_ok());
        assert!(state.check(Resource::Group, Action::Delete).is_ok());
    }

    // ─── Resource / action ───────────────────────────────────────────

    #[test]
    fn unconfigured_resource_denied_for_every_action() {
        let state = state_with(Resource::User, ResourcePolicy::full());
        for action in Action::ALL {
            assert_eq!(
                kind_of(state.check(Resource::Department, action)),
                DenialKind::ResourceNotConfigured
            );
        }
    }

    #[test]
    fn action_flag_off_denied() {
        let state = state_with(
            Resource::Group,
            ResourcePolicy {
                read: true,
                ..Default::default()
            },
        );
        assert!(state.check(Resource::Group, Action::Read).is_ok());
        let err = state.check(Resource::Group, Action::Create).unwrap_err();
        assert_eq!(err.kind(), DenialKind::ActionNotPermitted);
        assert!(err.to_string().contains("action not permitted"), "got: {err}");
    }

    // ─── Row-level allow list ────────────────────────────────────────

    #[test]
    fn empty_allowlist_admits_unseen_id() {
        let state = state_with(
            Resource::User,
            ResourcePolicy {
                read: true,
                ..Default::default()
            },
        );
        assert!(state
            .check_with_id(Resource::User, Action::Read, "user123")
            .is_ok());
    }

    #[test]
    fn allowlist_membership() {
        let state = state_with(
            Resource::User,
            ResourcePolicy {
                read: true,
                allowlist: vec!["a".into(), "b".into()],
                ..Default::default()
            },
        );
        assert!(state.check_with_id(Resource::User, Action::Read, "a").is_ok());
        assert!(state.check_with_id(Resource::User, Action::Read, "b").is_ok());

        let err = state
            .check_with_id(Resource::User, Action::Read, "c")
            .unwrap_err();
        assert_eq!(err.kind(), DenialKind::IdentifierNotAllowed);
        assert!(err.to_string().contains("not in allow list"), "got: {err}");
        assert!(err.to_string().contains("'c'"), "got: {err}");
    }

    #[test]
    fn empty_id_skips_allowlist() {
        let state = state_with(
            Resource::User,
            ResourcePolicy {
                read: true,
                allowlist: vec!["a".into()],
                ..Default::default()
            },
        );
        assert!(state.check_with_id(Resource::User, Action::Read, "").is_ok());
        assert!(state.check(Resource::User, Action::Read).is_ok());
    }

    #[test]
    fn action_check_precedes_allowlist() {
        let state = state_with(
            Resource::User,
            ResourcePolicy {
                read: false,
                allowlist: vec!["a".into()],
                ..Default::default()
            },
        );
        assert_eq!(
            kind_of(state.check_with_id(Resource::User, Action::Read, "a")),
            DenialKind::ActionNotPermitted
        );
    }

    #[test]
    fn allowlist_applies_to_every_action_with_id() {
        let state = state_with(
            Resource::Session,
            ResourcePolicy {
                allowlist: vec!["s1".into()],
                ..ResourcePolicy::full()
            },
        );
        for action in Action::ALL {
            assert!(state.check_with_id(Resource::Session, action, "s1").is_ok());
            assert_eq!(
                kind_of(state.check_with_id(Resource::Session, action, "s2")),
                DenialKind::IdentifierNotAllowed
            );
        }
    }

    // ─── Message send ────────────────────────────────────────────────

    #[test]
    fn send_requires_configured_message_resource() {
        let state = PermissionState::new(true, false, BTreeMap::new());
        let err = state.check_message_send("user1", "dept1").unwrap_err();
        assert_eq!(err.kind(), DenialKind::ResourceNotConfigured);
        assert!(err.to_string().contains("'message'"), "got: {err}");
    }

    #[test]
    fn send_requires_create() {
        let state = state_with(Resource::Message, ResourcePolicy::default());
        let err = state.check_message_send("user1", "dept1").unwrap_err();
        assert_eq!(
            err,
            PermissionDenied::ActionNotPermitted {
                resource: Resource::Message,
                action: Action::Create,
            }
        );
    }

    #[test]
    fn send_unrestricted_when_allowsend_empty() {
        let state = message_state(&[], &[]);
        assert!(state.check_message_send("any_user", "any_dept").is_ok());
        assert!(state.check_message_send("a|b|c", "x|y").is_ok());
    }

    #[test]
    fn send_user_restriction() {
        let state = message_state(&["10232", "8891"], &[]);
        assert!(state.check_message_send("10232", "").is_ok());
        assert!(state.check_message_send("10232|8891", "").is_ok());
        assert!(state.check_message_send("10232 | 8891", "").is_ok());
        assert!(state.check_message_send("", "any_dept").is_ok());

        let err = state.check_message_send("10232|99999", "").unwrap_err();
        assert_eq!(
            err,
            PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::User,
                token: "99999".to_string(),
            }
        );
        assert!(
            err.to_string()
                .contains("not permitted to send to user '99999'"),
            "got: {err}"
        );
    }

    #[test]
    fn send_reports_first_offending_user() {
        let state = message_state(&["10232"], &[]);
        let err = state
            .check_message_send("10232|77777|99999", "")
            .unwrap_err();
        assert!(err.to_string().contains("'77777'"), "got: {err}");
        assert!(!err.to_string().contains("99999"), "got: {err}");
    }

    #[test]
    fn send_department_restriction() {
        let state = message_state(&[], &["1", "2"]);
        assert!(state.check_message_send("", "1").is_ok());
        assert!(state.check_message_send("", "1|2").is_ok());
        assert!(state.check_message_send("anyone", "").is_ok());

        let err = state.check_message_send("", "1|999").unwrap_err();
        assert_eq!(
            err,
            PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::Department,
                token: "999".to_string(),
            }
        );
        assert!(
            err.to_string()
                .contains("not permitted to send to department '999'"),
            "got: {err}"
        );
    }

    #[test]
    fn send_checks_users_before_departments() {
        let state = message_state(&["10232", "8891"], &["1"]);
        assert!(state.check_message_send("10232", "1").is_ok());

        let err = state.check_message_send("99999", "999").unwrap_err();
        assert_eq!(
            err,
            PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::User,
                token: "99999".to_string(),
            }
        );

        let err = state.check_message_send("10232", "999").unwrap_err();
        assert_eq!(
            err,
            PermissionDenied::RecipientNotAllowed {
                kind: RecipientKind::Department,
                token: "999".to_string(),
            }
        );
    }

    #[test]
    fn send_ignores_phantom_empty_tokens() {
        let state = message_state(&["10232"], &["1"]);
        assert!(state.check_message_send("|10232|", " | ").is_ok());
        assert!(state.check_message_send("", "").is_ok());
    }
}
