//! Shared E2E test helpers for `youdu-guard` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Policy used by most tests: enforcing, with a few configured resources.
pub const ENFORCING_POLICY: &str = r#"
[permission]
enabled = true
allow_all = false

[permission.resources.dept]
read = true
allowlist = ["1", "2"]

[permission.resources.user]
create = false
read = true
update = true
delete = false

[permission.resources.message]
create = true
allowsend = { users = ["10232", "8891"], dept = ["1"] }
"#;

/// Remove every `YOUDU_*` variable and `RUST_LOG` inherited from the
/// developer's shell so that only the test's own config applies.
fn strip_youdu_env(cmd: &mut assert_cmd::Command) {
    for (key, _) in std::env::vars_os() {
        if let Some(key) = key.to_str() {
            if key.starts_with("YOUDU_") {
                cmd.env_remove(key);
            }
        }
    }
    cmd.env_remove("RUST_LOG");
}

/// Build a Command with no `--config`, running inside an empty tempdir
/// that also serves as `$HOME`.
///
/// Returns (command, _guard); keep the guard alive for the test's duration.
pub fn guard_cmd_bare() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("youdu-guard");
    cmd.timeout(TIMEOUT_BASIC);
    strip_youdu_env(&mut cmd);
    cmd.env("HOME", tmp.path()).current_dir(tmp.path());
    (cmd, tmp)
}

/// Build a Command reading `config` through `--config`.
pub fn guard_cmd(config: &str) -> (assert_cmd::Command, tempfile::TempDir) {
    let (mut cmd, tmp) = guard_cmd_bare();
    let path = write_config(&tmp, "guard.toml", config);
    cmd.args(["--config", path.to_str().expect("valid utf8")]);
    (cmd, tmp)
}

/// Write `content` to `name` inside `dir`.
pub fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write config");
    path
}
