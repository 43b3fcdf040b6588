//! Form input from the command line
//!
//! Builds the raw settings a save submits, from (in order) the stored
//! settings, a JSON object file, `--set key=value` pairs and the checkbox
//! flags. Later sources override earlier ones.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use smt_sync::domain::ports::SettingsRepository;
use smt_sync::domain::value_objects::{fields, RawSettings};
use smt_sync::presentation::InputArgs;

/// Malformed command-line input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("cannot read input {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("input {} is not a JSON object of form fields: {message}", .path.display())]
    Json { path: PathBuf, message: String },

    #[error("invalid --set '{0}': expected KEY=VALUE")]
    BadAssignment(String),

    #[error(transparent)]
    Store(#[from] smt_sync::domain::ports::StoreError),
}

/// Assemble the submitted form
pub fn collect<SR: SettingsRepository>(
    args: &InputArgs,
    store: &SR,
) -> Result<RawSettings, InputError> {
    let mut raw = if args.from_store {
        store.load()?.to_raw()
    } else {
        RawSettings::new()
    };

    if let Some(path) = &args.input {
        raw.merge(read_json(path)?);
    }

    for assignment in &args.set {
        let (key, value) = parse_assignment(assignment)?;
        raw.insert(key, value);
    }

    if args.enable_service {
        raw.insert(fields::ENABLE_SERVICE, "on");
    }
    if args.disable_service {
        raw.remove(fields::ENABLE_SERVICE);
    }

    tracing::debug!(fields = raw.len(), "collected form input");
    Ok(raw)
}

fn read_json(path: &Path) -> Result<RawSettings, InputError> {
    let read_err = |e: std::io::Error| InputError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_err)?
    };

    parse_json(&text).map_err(|e| InputError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_json(text: &str) -> Result<RawSettings, serde_json::Error> {
    serde_json::from_str(text)
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str), InputError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(InputError::BadAssignment(assignment.to_string())),
    }
}
