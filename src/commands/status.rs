//! Status command handler
//!
//! Exits non-zero when config.yaml does not match the stored settings.

use std::process::ExitCode;

use anyhow::Result;

use smt_sync::config::AppConfig;
use smt_sync::presentation::factory;
use smt_sync::presentation::output::{render_status, status_json};

pub fn cmd_status(config: &AppConfig, json: bool) -> Result<ExitCode> {
    let report = factory::create_status_use_case(config).execute();

    if json {
        println!("{}", status_json(&report));
    } else {
        print!("{}", render_status(&report));
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
