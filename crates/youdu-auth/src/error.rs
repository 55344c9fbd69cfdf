//! Denial taxonomy.
//!
//! Every refused check returns a [`PermissionDenied`]. A denial is an
//! expected outcome, not a malfunction: callers surface the message
//! unchanged at their own boundary (HTTP body, CLI stderr, tool error).
//!
//! ```text
//! check_with_id(resource, action, id)
//!     │
//!     ├── resource missing      → ResourceNotConfigured
//!     ├── action flag false     → ActionNotPermitted
//!     ├── id outside allowlist  → IdentifierNotAllowed
//!     │
//! check_message_send(users, depts)
//!     └── token outside allowsend → RecipientNotAllowed { kind, token }
//!
//! "frobnicate".parse::<Action>() → UnknownAction
//! ```
//!
//! # Markers
//!
//! Message wording may change; the marker substring of each
//! [`DenialKind`] may not. Downstream layers match on
//! [`DenialKind::marker`].

use crate::{Action, Resource};
use std::fmt;
use thiserror::Error;

/// Which addressee namespace a recipient token was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientKind {
    /// Direct addressee (a user).
    User,
    /// Group addressee (a department).
    Department,
}

impl RecipientKind {
    /// Returns the namespace name used in denial messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Department => "department",
        }
    }
}

impl fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refused permission check.
///
/// Callers can match on the variant (or on [`kind`](Self::kind)) to decide
/// how to present the refusal.
///
/// # Example
///
/// ```
/// use youdu_auth::{DenialKind, PermissionDenied, Resource};
///
/// let err = PermissionDenied::ResourceNotConfigured {
///     resource: Resource::Message,
/// };
///
/// assert_eq!(err.kind(), DenialKind::ResourceNotConfigured);
/// assert!(err.to_string().contains(DenialKind::ResourceNotConfigured.marker()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    /// The resource has no policy entry.
    #[error("permission denied: resource not configured: '{resource}' has no policy")]
    ResourceNotConfigured {
        /// The resource that was looked up.
        resource: Resource,
    },

    /// The policy exists but the action flag is off.
    #[error("permission denied: action not permitted for this resource: '{action}' on '{resource}'")]
    ActionNotPermitted {
        /// The resource the action targeted.
        resource: Resource,
        /// The refused action.
        action: Action,
    },

    /// An action name outside the closed set reached a string boundary.
    #[error("permission denied: unknown action '{action}'")]
    UnknownAction {
        /// The raw action name.
        action: String,
    },

    /// The row-level allow list is set and the identifier is not on it.
    #[error("permission denied: identifier '{id}' of '{resource}' is not in allow list")]
    IdentifierNotAllowed {
        /// The resource whose allow list was consulted.
        resource: Resource,
        /// The rejected identifier.
        id: String,
    },

    /// A send names a recipient outside the configured send set.
    #[error("permission denied: not permitted to send to {kind} '{token}'")]
    RecipientNotAllowed {
        /// Namespace of the rejected recipient.
        kind: RecipientKind,
        /// The first rejected recipient token, as written by the caller.
        token: String,
    },
}

/// Fieldless discriminant of [`PermissionDenied`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialKind {
    /// See [`PermissionDenied::ResourceNotConfigured`].
    ResourceNotConfigured,
    /// See [`PermissionDenied::ActionNotPermitted`].
    ActionNotPermitted,
    /// See [`PermissionDenied::UnknownAction`].
    UnknownAction,
    /// See [`PermissionDenied::IdentifierNotAllowed`].
    IdentifierNotAllowed,
    /// See [`PermissionDenied::RecipientNotAllowed`].
    RecipientNotAllowed,
}

impl DenialKind {
    /// Substring guaranteed to appear in every message of this kind.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::ResourceNotConfigured => "resource not configured",
            Self::ActionNotPermitted => "action not permitted",
            Self::UnknownAction => "unknown action",
            Self::IdentifierNotAllowed => "not in allow list",
            Self::RecipientNotAllowed => "not permitted to send to",
        }
    }

    /// Returns `true` if this denial indicates a caller bug rather than policy.
    ///
    /// Only [`UnknownAction`](Self::UnknownAction) qualifies: the action set
    /// is closed and every call site hard-codes its action.
    #[must_use]
    pub fn is_defect(self) -> bool {
        matches!(self, Self::UnknownAction)
    }
}

impl PermissionDenied {
    /// Returns the discriminant of this denial.
    #[must_use]
    pub fn kind(&self) -> DenialKind {
        match self {
            Self::ResourceNotConfigured { .. } => DenialKind::ResourceNotConfigured,
            Self::ActionNotPermitted { .. } => DenialKind::ActionNotPermitted,
            Self::UnknownAction { .. } => DenialKind::UnknownAction,
            Self::IdentifierNotAllowed { .. } => DenialKind::IdentifierNotAllowed,
            Self::RecipientNotAllowed { .. } => DenialKind::RecipientNotAllowed,
        }
    }

    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self.kind() {
            DenialKind::ResourceNotConfigured => "PERMISSION_RESOURCE_NOT_CONFIGURED",
            DenialKind::ActionNotPermitted => "PERMISSION_ACTION_NOT_PERMITTED",
            DenialKind::UnknownAction => "PERMISSION_UNKNOWN_ACTION",
            DenialKind::IdentifierNotAllowed => "PERMISSION_IDENTIFIER_NOT_ALLOWED",
            DenialKind::RecipientNotAllowed => "PERMISSION_RECIPIENT_NOT_ALLOWED",
        }
    }
}
