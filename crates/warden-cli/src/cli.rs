//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use warden_authz::{Auditor, AuthSession, RoleRegistry, RouteGuard, RouteTable};
use warden_common_config::{ConfigLoader, Environment, WardenConfig};
use warden_session::{ActiveRoleStore, FileStore};

use crate::commands::{
    AssumeCommand, CheckCommand, ConsoleRolesCommand, LogoutCommand, NavCommand,
    ResourcesCommand, RolesCommand, RouteCommand, WhoamiCommand,
};
use crate::error::CliError;

/// Warden - permission core of the IAM console
///
/// Assume cloud roles, evaluate permissions and walk the console's route guard.
#[derive(Debug, Parser)]
#[command(
    name = "warden",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "WARDEN_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Directory holding the session state file
    #[arg(
        long,
        global = true,
        env = "WARDEN_DATA_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    // === Cloud roles ===
    /// List assumable roles, or show one role's permissions
    Roles(RolesCommand),

    /// Assume a role for subsequent commands
    Assume(AssumeCommand),

    /// Check whether the active role permits an action on a resource
    Check(CheckCommand),

    /// Show resource cards and which actions the active role enables
    Resources(ResourcesCommand),

    // === Console ===
    /// Show the signed-in user and the active role
    Whoami(WhoamiCommand),

    /// Run the route guard for a console path
    Route(RouteCommand),

    /// Show the sidebar entries visible to the signed-in user
    Nav(NavCommand),

    /// List the role-management page's roles
    #[command(name = "console-roles")]
    ConsoleRoles(ConsoleRolesCommand),

    /// Drop the active role and auth token
    Logout(LogoutCommand),
}

impl Cli {
    /// Load configuration from `--config` or the working directory.
    pub fn load_config(&self) -> Result<WardenConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        tracing::debug!(path = %loader.path().display(), "loading configuration");
        let mut config = loader.load()?;
        Environment::apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self, config: WardenConfig) -> Result<(), CliError> {
        let data_dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.session.data_dir));
        let ctx = CommandContext::new(config, self.format, data_dir);

        let name = self.command.name();
        let _span = warden_common_log::spans::command_span(name).entered();
        warden_common_log::timed!(name, match &self.command {
            Command::Roles(cmd) => cmd.execute(&ctx),
            Command::Assume(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Resources(cmd) => cmd.execute(&ctx),
            Command::Whoami(cmd) => cmd.execute(&ctx),
            Command::Route(cmd) => cmd.execute(&ctx),
            Command::Nav(cmd) => cmd.execute(&ctx),
            Command::ConsoleRoles(cmd) => cmd.execute(&ctx),
            Command::Logout(cmd) => cmd.execute(&ctx),
        })
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Roles(_) => "roles",
            Self::Assume(_) => "assume",
            Self::Check(_) => "check",
            Self::Resources(_) => "resources",
            Self::Whoami(_) => "whoami",
            Self::Route(_) => "route",
            Self::Nav(_) => "nav",
            Self::ConsoleRoles(_) => "console-roles",
            Self::Logout(_) => "logout",
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: WardenConfig,
    pub format: OutputFormat,
    pub data_dir: PathBuf,
    pub registry: RoleRegistry,
    pub auditor: Auditor,
}

impl CommandContext {
    pub fn new(config: WardenConfig, format: OutputFormat, data_dir: PathBuf) -> Self {
        let auditor = Auditor::new(config.audit.log_decisions);
        Self {
            config,
            format,
            data_dir,
            registry: RoleRegistry::builtin(),
            auditor,
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.session.state_file)
    }

    /// The active-role holder over this invocation's state file.
    pub fn role_store(&self) -> ActiveRoleStore<FileStore> {
        ActiveRoleStore::new(FileStore::new(self.state_path()))
    }

    /// The console session; `signed_out` simulates a visitor with no user.
    pub fn session(&self, signed_out: bool) -> AuthSession {
        if signed_out {
            AuthSession::anonymous()
        } else {
            AuthSession::mock()
        }
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::from_config(&self.config.guard)
    }

    /// Console routes with configured overrides applied.
    pub fn route_table(&self) -> Result<RouteTable, CliError> {
        Ok(RouteTable::console().with_overrides(&self.config.routes)?)
    }
}
