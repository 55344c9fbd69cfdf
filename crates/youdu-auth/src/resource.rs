//! Protected resource kinds and the operations attempted on them.
//!
//! A permission check is always phrased as "may [`Action`] be performed
//! on [`Resource`]?". Both enums are closed: every business call site
//! names one of each, hard-coded.
//!
//! # String Forms
//!
//! | Resource | Name |      | Action | Name |
//! |----------|------|------|--------|------|
//! | Department | `dept` | | Create | `create` |
//! | User | `user` | | Read | `read` |
//! | Group | `group` | | Update | `update` |
//! | Session | `session` | | Delete | `delete` |
//! | Message | `message` | | | |
//!
//! The names are used as configuration keys and in denial messages.

use crate::PermissionDenied;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ─── Resource ────────────────────────────────────────────────────────

/// A protected entity category of the wrapped business system.
///
/// Identifies *which* [`ResourcePolicy`](crate::ResourcePolicy) applies.
///
/// # Example
///
/// ```
/// use youdu_auth::Resource;
///
/// let r: Resource = "dept".parse().unwrap();
/// assert_eq!(r, Resource::Department);
/// assert_eq!(r.to_string(), "dept");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Organisation departments.
    #[serde(rename = "dept")]
    Department,
    /// User accounts.
    User,
    /// Chat groups.
    Group,
    /// Conversation sessions.
    Session,
    /// Messages. Create doubles as "send".
    Message,
}

impl Resource {
    /// All resource kinds, in display order.
    pub const ALL: [Resource; 5] = [
        Self::Department,
        Self::User,
        Self::Group,
        Self::Session,
        Self::Message,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "dept",
            Self::User => "user",
            Self::Group => "group",
            Self::Session => "session",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Resource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource '{0}' (expected one of: dept, user, group, session, message)")]
pub struct ParseResourceError(pub String);

impl FromStr for Resource {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseResourceError(s.to_string()))
    }
}

// ─── Action ──────────────────────────────────────────────────────────

/// An operation attempted on a [`Resource`].
///
/// Maps 1:1 onto the four flags of a [`ResourcePolicy`](crate::ResourcePolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a new entity (for messages: send).
    Create,
    /// Read or list entities.
    Read,
    /// Modify an existing entity.
    Update,
    /// Remove an entity.
    Delete,
}

impl Action {
    /// All actions, in display order.
    pub const ALL: [Action; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is the only place an action outside the closed set can appear,
/// so the failure is reported as [`PermissionDenied::UnknownAction`].
impl FromStr for Action {
    type Err = PermissionDenied;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| PermissionDenied::UnknownAction {
                action: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DenialKind;

    #[test]
    fn resource_names_roundtrip() {
        for r in Resource::ALL {
            assert_eq!(r.as_str().parse::<Resource>(), Ok(r));
        }
    }

    #[test]
    fn resource_parse_is_case_sensitive() {
        let err = "Dept".parse::<Resource>().unwrap_err();
        assert!(err.to_string().contains("'Dept'"), "got: {err}");
    }

    #[test]
    fn department_serializes_as_dept() {
        let json = serde_json::to_string(&Resource::Department).unwrap();
        assert_eq!(json, "\"dept\"");
        let back: Resource = serde_json::from_str("\"message\"").unwrap();
        assert_eq!(back, Resource::Message);
    }

    #[test]
    fn action_parse() {
        assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
        assert_eq!("delete".parse::<Action>().unwrap(), Action::Delete);
    }

    #[test]
    fn unknown_action_is_denial() {
        let err = "purge".parse::<Action>().unwrap_err();
        assert_eq!(err.kind(), DenialKind::UnknownAction);
        assert!(err.to_string().contains("unknown action"), "got: {err}");
        assert!(err.to_string().contains("purge"), "got: {err}");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Action::Update.to_string(), "update");
        assert_eq!(Resource::Session.to_string(), "session");
    }
}
