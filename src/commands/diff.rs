//! Diff command handler
//!
//! Shows how config.yaml would change if the given input were saved. Without
//! input, compares against the stored settings like `status`.

use std::process::ExitCode;

use anyhow::Result;

use smt_sync::application::ArtifactStatus;
use smt_sync::config::AppConfig;
use smt_sync::domain::ports::SettingsRepository;
use smt_sync::domain::services::validate;
use smt_sync::presentation::{factory, InputArgs};

use super::input;

pub fn cmd_diff(config: &AppConfig, args: &InputArgs, json: bool) -> Result<ExitCode> {
    let store = factory::create_settings_repository(config);
    let candidate = if args.is_empty() {
        store.load_or_default()
    } else {
        let raw = input::collect(args, &store)?;
        match validate(&raw) {
            Ok(model) => model,
            Err(err) => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({"error": {"kind": "validation", "message": err.to_string()}})
                    );
                } else {
                    eprintln!("Configuration not saved: {}", err);
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let status = factory::create_status_use_case(config).compare(&candidate);
    let path = config.artifact.path.display();

    if json {
        let (additions, deletions, diff) = match &status {
            ArtifactStatus::Drifted { diff, unified, .. } => {
                (diff.additions, diff.deletions, unified.as_str())
            }
            _ => (0, 0, ""),
        };
        println!(
            "{}",
            serde_json::json!({
                "path": path.to_string(),
                "artifact": status.label(),
                "additions": additions,
                "deletions": deletions,
                "diff": diff,
            })
        );
        return Ok(ExitCode::SUCCESS);
    }

    match status {
        ArtifactStatus::InSync { .. } => println!("No changes to {}", path),
        ArtifactStatus::Missing => println!("{} does not exist; a save would create it", path),
        ArtifactStatus::Drifted { unified, diff, .. } => {
            print!("{}", unified);
            println!("{} ({})", path, diff.summary());
        }
        ArtifactStatus::Unreadable { error } => {
            eprintln!("{}", error);
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
