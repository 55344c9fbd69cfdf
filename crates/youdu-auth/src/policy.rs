//! Per-resource rule sets.
//!
//! A [`ResourcePolicy`] has two layers:
//!
//! ```text
//! ResourcePolicy
//!   ├── create / read / update / delete   coarse: may the action run at all?
//!   ├── allowlist                         row-level: which identifiers pass?
//!   └── allowsend (message only)          which recipients may be addressed?
//! ```
//!
//! The coarse flag is always consulted first. Lists narrow an allowed
//! action; they never widen a denied one. An empty list means
//! "no restriction".
//!
//! # Configuration Form
//!
//! ```toml
//! [permission.resources.user]
//! read = true
//! allowlist = ["10232", "10023"]
//!
//! [permission.resources.message]
//! create = true
//! allowsend = { users = ["10232", "8891"], dept = ["1"] }
//! ```

use crate::Action;
use serde::{Deserialize, Serialize};

/// Allow/deny configuration for one [`Resource`](crate::Resource).
///
/// Every field is optional in configuration; a missing flag is `false`
/// and a missing list is empty.
///
/// # Example
///
/// ```
/// use youdu_auth::{Action, ResourcePolicy};
///
/// let policy = ResourcePolicy {
///     read: true,
///     allowlist: vec!["10232".into()],
///     ..Default::default()
/// };
///
/// assert!(policy.allows(Action::Read));
/// assert!(!policy.allows(Action::Delete));
/// assert!(policy.permits_id("10232"));
/// assert!(!policy.permits_id("99999"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePolicy {
    /// Allow creating.
    pub create: bool,
    /// Allow reading.
    pub read: bool,
    /// Allow updating.
    pub update: bool,
    /// Allow deleting.
    pub delete: bool,
    /// Row-level allow list. Empty means every identifier passes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowlist: Vec<String>,
    /// Recipient restrictions for sends. Only meaningful for messages.
    #[serde(skip_serializing_if = "AllowSend::is_unrestricted")]
    pub allowsend: AllowSend,
}

impl ResourcePolicy {
    /// A policy allowing all four actions with no list restrictions.
    #[must_use]
    pub fn full() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
            ..Self::default()
        }
    }

    /// Returns the flag for `action`.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    /// Sets the flag for `action`.
    pub fn set(&mut self, action: Action, allowed: bool) {
        let flag = match action {
            Action::Create => &mut self.create,
            Action::Read => &mut self.read,
            Action::Update => &mut self.update,
            Action::Delete => &mut self.delete,
        };
        *flag = allowed;
    }

    /// Returns `true` if `id` passes the row-level allow list.
    ///
    /// Membership is exact and case-sensitive. An empty list passes everything.
    #[must_use]
    pub fn permits_id(&self, id: &str) -> bool {
        self.allowlist.is_empty() || self.allowlist.iter().any(|allowed| allowed == id)
    }
}

/// Recipient restrictions for message sends.
///
/// The two namespaces are independent: restricting users leaves
/// departments unrestricted and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowSend {
    /// Direct addressees that may receive. Empty means any user.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    /// Department addressees that may receive. Empty means any department.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dept: Vec<String>,
}

impl AllowSend {
    /// Returns `true` if neither namespace is restricted.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.users.is_empty() && self.dept.is_empty()
    }
}
