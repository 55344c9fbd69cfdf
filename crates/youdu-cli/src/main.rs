//! youdu-guard - inspect and exercise the gateway permission policy
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`YOUDU_*`)
//! 3. Project config (`config.toml` in current directory)
//! 4. Global config (`~/.youdu/config.toml`)
//! 5. Default values (lowest priority)
//!
//! `--config` (or `YOUDU_CONFIG_FILE`) replaces 3 and 4 with a single file.
//!
//! # Environment Variables
//!
//! - `YOUDU_CONFIG_FILE`: Explicit config file
//! - `YOUDU_LOG_LEVEL`: Fallback log filter when `RUST_LOG` is unset
//! - `YOUDU_PERMISSION_ENABLED`: Enforce permission checks (`true`/`false`)
//! - `YOUDU_PERMISSION_ALLOW_ALL`: Bypass every policy (`true`/`false`)
//! - `YOUDU_PERMISSION_RESOURCES_<RES>_<ACTION>`: Override one action flag
//!
//! # Exit Status
//!
//! `check` and `check-send` print `allowed` and exit 0, or print the denial
//! to stderr and exit 1.

mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use report::{PolicyReport, StatusReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use youdu_runtime::config::{ConfigError, ConfigLoader, ConfigResolver, GuardConfig};
use youdu_runtime::{Action, PermissionDenied, PolicyStore, Resource};

/// youdu-guard - inspect and exercise the gateway permission policy
#[derive(Parser, Debug)]
#[command(name = "youdu-guard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Read exactly this config file (also: YOUDU_CONFIG_FILE)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enforce permission checks regardless of config
    #[arg(long, global = true, conflicts_with = "disable")]
    enable: bool,

    /// Turn permission checks off regardless of config
    #[arg(long, global = true)]
    disable: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect and exercise the permission policy
    #[command(subcommand)]
    Permission(PermissionCommand),
}

#[derive(Subcommand, Debug)]
enum PermissionCommand {
    /// Show whether permission checks are enforced
    Status,

    /// Show the policy of every resource
    List {
        /// Print the policy snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check one operation against the policy
    Check {
        /// Resource kind: dept, user, group, session or message
        resource: Resource,

        /// Action: create, read, update or delete
        action: String,

        /// Target identifier for the row-level allow list
        #[arg(long, default_value = "")]
        id: String,
    },

    /// Check a message send against the recipient allow sets
    CheckSend {
        /// `|`-separated user recipients
        #[arg(long, value_name = "USERS", default_value = "")]
        to_user: String,

        /// `|`-separated department recipients
        #[arg(long, value_name = "DEPTS", default_value = "")]
        to_dept: String,
    },
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    config_file: Option<PathBuf>,
    enabled: Option<bool>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let enabled = if args.enable {
            Some(true)
        } else if args.disable {
            Some(false)
        } else {
            None
        };

        Self {
            config_file: args.config.clone(),
            enabled,
        }
    }

    fn resolve(&self) -> Result<GuardConfig, ConfigError> {
        let mut loader = ConfigLoader::new();
        if let Some(ref path) = self.config_file {
            loader = loader.with_config_file(path);
        }

        let mut config = loader.load()?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut GuardConfig) {
        if let Some(enabled) = self.enabled {
            config.permission_mut().enabled = Some(enabled);
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Resolve config first: the log filter falls back to logging.level.
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver
        .resolve()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    // Filter: --debug > --verbose > RUST_LOG env > logging.level.
    // Logs go to stderr so stdout carries only command output.
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let store = config
        .build_store()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    info!(
        enabled = store.is_enabled(),
        allow_all = store.is_allow_all(),
        "Permission policy loaded"
    );

    match args.command {
        Command::Permission(cmd) => run_permission(&cmd, &store),
    }
}

fn run_permission(cmd: &PermissionCommand, store: &PolicyStore) -> Result<ExitCode> {
    match cmd {
        PermissionCommand::Status => {
            print!("{}", StatusReport(&store.snapshot()));
            Ok(ExitCode::SUCCESS)
        }
        PermissionCommand::List { json } => {
            // One snapshot so every row reflects the same instant.
            let snapshot = store.snapshot();
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", PolicyReport(&snapshot));
            }
            Ok(ExitCode::SUCCESS)
        }
        PermissionCommand::Check {
            resource,
            action,
            id,
        } => {
            let outcome = action
                .parse::<Action>()
                .and_then(|action| store.check_with_id(*resource, action, id));
            Ok(verdict(outcome))
        }
        PermissionCommand::CheckSend { to_user, to_dept } => {
            Ok(verdict(store.check_message_send(to_user, to_dept)))
        }
    }
}

fn verdict(outcome: Result<(), PermissionDenied>) -> ExitCode {
    match outcome {
        Ok(()) => {
            println!("allowed");
            ExitCode::SUCCESS
        }
        Err(denied) => {
            eprintln!("{denied}");
            ExitCode::FAILURE
        }
    }
}
