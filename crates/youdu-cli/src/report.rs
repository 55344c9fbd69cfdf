//! Human-readable rendering of a policy snapshot.

use std::fmt;
use youdu_runtime::{Action, PermissionState, Resource, ResourcePolicy};

/// `permission status` output.
pub(crate) struct StatusReport<'a>(pub(crate) &'a PermissionState);

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "=== Permission Status ===")?;
        if !state.enabled() {
            writeln!(f, "status: disabled (all operations allowed)")?;
        } else if state.allow_all() {
            writeln!(f, "status: enabled, allow_all set (all operations allowed)")?;
        } else {
            writeln!(f, "status: enabled")?;
        }
        Ok(())
    }
}

/// `permission list` output.
pub(crate) struct PolicyReport<'a>(pub(crate) &'a PermissionState);

impl fmt::Display for PolicyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "=== Resource Policies ===")?;

        for resource in Resource::ALL {
            writeln!(f)?;
            writeln!(f, "[{resource}]")?;
            match state.policy(resource) {
                Some(policy) => write_policy(f, resource, policy)?,
                None => writeln!(f, "  not configured (all operations denied)")?,
            }
        }

        if !state.enabled() {
            writeln!(f)?;
            writeln!(
                f,
                "hint: permission checks are disabled; the policies above are not enforced."
            )?;
            writeln!(
                f,
                "hint: set `enabled = true` under [permission] in config.toml to enforce them."
            )?;
        }
        Ok(())
    }
}

fn write_policy(
    f: &mut fmt::Formatter<'_>,
    resource: Resource,
    policy: &ResourcePolicy,
) -> fmt::Result {
    for action in Action::ALL {
        let label = format!("{action}:");
        let verdict = if policy.allows(action) {
            "allow"
        } else {
            "deny"
        };
        writeln!(f, "  {label:<8}{verdict}")?;
    }
    writeln!(f, "  allowlist: {}", joined(&policy.allowlist))?;

    if resource == Resource::Message {
        writeln!(f, "  allowsend.users: {}", joined(&policy.allowsend.users))?;
        writeln!(f, "  allowsend.dept:  {}", joined(&policy.allowsend.dept))?;
    }
    Ok(())
}

fn joined(list: &[String]) -> String {
    if list.is_empty() {
        "(any)".to_string()
    } else {
        list.join(", ")
    }
}
