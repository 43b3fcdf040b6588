//! Show command handler

use std::process::ExitCode;

use anyhow::{Context, Result};

use smt_sync::config::AppConfig;
use smt_sync::domain::ports::SettingsRepository;
use smt_sync::presentation::factory;
use smt_sync::presentation::output::render_settings;

/// Print the stored settings
pub fn cmd_show(config: &AppConfig, json: bool) -> Result<ExitCode> {
    let store = factory::create_settings_repository(config);
    let model = store.load()?;

    if json {
        let text = serde_json::to_string_pretty(&model).context("failed to encode settings")?;
        println!("{}", text);
    } else {
        print!("{}", render_settings(&model));
    }
    Ok(ExitCode::SUCCESS)
}
