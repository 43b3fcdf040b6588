//! Render command handler
//!
//! Prints the config.yaml the stored settings generate, without writing it.

use std::process::ExitCode;

use anyhow::{Context, Result};

use smt_sync::config::AppConfig;
use smt_sync::domain::ports::SettingsRepository;
use smt_sync::domain::services::generate;
use smt_sync::domain::value_objects::ContentHash;
use smt_sync::presentation::factory;

pub fn cmd_render(config: &AppConfig, json: bool) -> Result<ExitCode> {
    let store = factory::create_settings_repository(config);
    let model = store.load()?;
    let yaml = generate(&model)
        .render()
        .context("failed to render config.yaml")?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "path": config.artifact.path.display().to_string(),
                "hash": ContentHash::from_content(&yaml).as_str(),
                "content": yaml,
            })
        );
    } else {
        print!("{}", yaml);
    }
    Ok(ExitCode::SUCCESS)
}
