//! smt-sync CLI - applies SMT plugin settings
//!
//! Usage: smt-sync <COMMAND>
//!
//! Commands:
//!   save     Validate, store and apply settings
//!   show     Print the stored settings
//!   render   Print the config.yaml the stored settings generate
//!   status   Check config.yaml against the stored settings
//!   diff     Preview how a save would change config.yaml
//!   service  Start, stop or re-apply the SMT service
//!
//! Exit codes: 0 success, 1 failed cycle or drift, 2 usage/config/input error.

mod commands;

use std::process::ExitCode;

use clap::Parser;

use smt_sync::config::AppConfig;
use smt_sync::error::ConfigError;
use smt_sync::presentation::{logging, Cli, Commands};

use commands::input::InputError;

const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: {:#}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let usage = err.downcast_ref::<ConfigError>().is_some()
                || matches!(
                    err.downcast_ref::<InputError>(),
                    Some(e) if !matches!(e, InputError::Store(_))
                );
            if usage {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, warnings) = AppConfig::discover(cli.config.as_deref())?;
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }
    tracing::debug!(
        store = %config.store.path.display(),
        artifact = %config.artifact.path.display(),
        service = %config.service.name,
        "configuration loaded"
    );

    match cli.command {
        Commands::Save { input, events } => {
            commands::save::cmd_save(&config, &input, cli.json, events)
        }
        Commands::Show => commands::show::cmd_show(&config, cli.json),
        Commands::Render => commands::render::cmd_render(&config, cli.json),
        Commands::Status => commands::status::cmd_status(&config, cli.json),
        Commands::Diff { input } => commands::diff::cmd_diff(&config, &input, cli.json),
        Commands::Service { action } => {
            commands::service::cmd_service(&config, action, cli.json)
        }
    }
}
