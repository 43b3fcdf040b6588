//! Output Rendering
//!
//! Text and JSON forms of use-case results. Renderers return strings; the
//! command layer decides where they go.

use std::fmt::Write;

use crate::application::{ArtifactStatus, StatusReport, SyncReport};
use crate::domain::entities::SettingsModel;
use crate::domain::value_objects::{fields, SyncState};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
}

impl Icons {
    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[WARN]",
        }
    }
}

/// Summary of a save
pub fn render_sync_report(report: &SyncReport) -> String {
    let icons = Icons::ascii();
    let outcome = &report.outcome;
    let mut out = String::new();

    let icon = match (report.state, outcome.error.is_some()) {
        (SyncState::Done, false) => icons.check,
        (SyncState::Done, true) => icons.warn,
        _ => icons.cross,
    };
    let _ = writeln!(out, "{} {}", icon, outcome.message());
    let _ = writeln!(out, "  state:            {}", report.state);
    let _ = writeln!(out, "  persisted:        {}", yes_no(outcome.persisted));
    let _ = writeln!(out, "  artifact written: {}", yes_no(outcome.artifact_written));
    let _ = writeln!(out, "  service action:   {}", outcome.service_action);
    out
}

/// Settings in form-field order, one `key = value` per line
pub fn render_settings(model: &SettingsModel) -> String {
    let values = [
        model.unbound_reload_command().to_string(),
        model.blocklist_repo_url().to_string(),
        model.blocklist_local_path().to_string(),
        model.usage_threshold_hours().to_string(),
        model.block_duration_minutes().to_string(),
        model.unbound_log_file().to_string(),
        model.rpz_file().to_string(),
        model.logging_level().to_string(),
        model.logging_file().to_string(),
        model.enable_service().to_string(),
    ];

    let width = fields::ALL.iter().map(|f| f.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (field, value) in fields::ALL.iter().zip(values.iter()) {
        let _ = writeln!(out, "{:width$} = {}", field, value, width = width);
    }
    out
}

/// Drift check result
pub fn render_status(report: &StatusReport) -> String {
    let icons = Icons::ascii();
    let mut out = String::new();

    if let Some(err) = &report.store_error {
        let _ = writeln!(out, "{} {} (compared against defaults)", icons.warn, err);
    }

    let path = report.artifact_path.display();
    match &report.artifact {
        ArtifactStatus::Missing => {
            let _ = writeln!(out, "{} {} does not exist", icons.cross, path);
        }
        ArtifactStatus::InSync { hash } => {
            let _ = writeln!(out, "{} {} is up to date ({})", icons.check, path, hash.short());
        }
        ArtifactStatus::Drifted {
            diff,
            unified,
            contract_error,
            ..
        } => {
            let _ = writeln!(
                out,
                "{} {} differs from the stored settings ({})",
                icons.cross,
                path,
                diff.summary()
            );
            if let Some(err) = contract_error {
                let _ = writeln!(out, "{} daemon would reject the file: {}", icons.warn, err);
            }
            out.push_str(unified);
        }
        ArtifactStatus::Unreadable { error } => {
            let _ = writeln!(out, "{} {}", icons.cross, error);
        }
    }
    out
}

pub fn status_json(report: &StatusReport) -> serde_json::Value {
    let mut json = serde_json::json!({
        "artifact_path": report.artifact_path.display().to_string(),
        "artifact": report.artifact.label(),
        "store_error": report.store_error.as_ref().map(|e| e.to_string()),
        "clean": report.is_clean(),
    });
    match &report.artifact {
        ArtifactStatus::InSync { hash } => {
            json["hash"] = serde_json::json!(hash.as_str());
        }
        ArtifactStatus::Drifted {
            expected,
            actual,
            diff,
            unified,
            contract_error,
        } => {
            json["expected_hash"] = serde_json::json!(expected.as_str());
            json["actual_hash"] = serde_json::json!(actual.as_str());
            json["additions"] = serde_json::json!(diff.additions);
            json["deletions"] = serde_json::json!(diff.deletions);
            json["diff"] = serde_json::json!(unified);
            json["contract_error"] = serde_json::json!(contract_error);
        }
        ArtifactStatus::Unreadable { error } => {
            json["error"] = serde_json::json!(error.to_string());
        }
        ArtifactStatus::Missing => {}
    }
    json
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
