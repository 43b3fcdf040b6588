//! Service command handler
//!
//! Starts or stops the SMT service without touching settings or config.yaml.

use std::process::ExitCode;

use anyhow::Result;

use smt_sync::config::AppConfig;
use smt_sync::domain::ports::SettingsRepository;
use smt_sync::presentation::{factory, ServiceCommand};

pub fn cmd_service(config: &AppConfig, action: ServiceCommand, json: bool) -> Result<ExitCode> {
    let enable = match action {
        ServiceCommand::Start => true,
        ServiceCommand::Stop => false,
        ServiceCommand::Apply => factory::create_settings_repository(config)
            .load()?
            .enable_service(),
    };

    let reconciler = factory::create_reconciler(config);
    let command = reconciler.command_for(enable).to_string();

    match reconciler.apply(enable) {
        Ok(done) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"command": command, "service_action": done.as_str()})
                );
            } else {
                println!("[OK] {} ({})", command, done);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"command": command, "error": err.to_string()})
                );
            } else {
                eprintln!("[FAIL] {}", err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
