//! Warden CLI - permission core of the IAM console mock.
//!
//! Main entry point for the `warden` binary.

use std::process::ExitCode;

use clap::Parser;
use warden_cli::cli::Cli;
use warden_cli::{CliError, Exit};
use warden_common_config::{vars, Environment};
use warden_common_log::{LogConfig, LogLevel};

fn main() -> ExitCode {
    let _env = Environment::init();
    let cli = Cli::parse();

    init_logging(&cli);

    match run(cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    let level_from_env =
        Environment::get(vars::WARDEN_LOG_LEVEL).is_some() || Environment::get(vars::RUST_LOG).is_some();
    if cli.verbose > 0 || cli.quiet || !level_from_env {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }
    if let Err(e) = warden_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}

fn report(e: &CliError) {
    tracing::debug!(code = e.code(), "command failed");
    eprintln!("error[{}]: {e}", e.code());
    if let Some(hint) = e.hint() {
        eprintln!("  hint: {hint}");
    }
    for suggestion in e.suggestions() {
        eprintln!("  - {suggestion}");
    }
}
