//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigError;

use super::types::AppConfig;

pub const ENV_STORE_PATH: &str = "SMT_STORE_PATH";
pub const ENV_ARTIFACT_PATH: &str = "SMT_ARTIFACT_PATH";
pub const ENV_SERVICE_NAME: &str = "SMT_SERVICE_NAME";
pub const ENV_SERVICE_PROGRAM: &str = "SMT_SERVICE_PROGRAM";
pub const ENV_COMMAND_TIMEOUT: &str = "SMT_COMMAND_TIMEOUT";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(AppConfig, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: AppConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.service.timeout_secs == 0 {
        return Err(ConfigError::Parse {
            path: path.to_path_buf(),
            message: "service.timeout_secs must be greater than 0".to_string(),
        });
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config file, load it, then apply environment overrides.
///
/// An explicit path must exist. Without one, the user config is used when
/// present, otherwise built-in defaults.
pub fn discover(explicit: Option<&Path>) -> Result<(AppConfig, Vec<ConfigWarning>), ConfigError> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match user_config_path().filter(|p| p.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using user config");
                load_with_warnings(&path)?
            }
            None => (AppConfig::default(), Vec::new()),
        },
    };

    let config = with_env_overrides(config, |name| std::env::var(name).ok())?;
    Ok((config, warnings))
}

/// `$XDG_CONFIG_HOME/smt-sync/config.toml` (or the platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("smt-sync").join("config.toml"))
}

/// Apply environment variable overrides (SMT_* prefix)
///
/// `lookup` returns the value of a variable, if set. Empty values are ignored.
pub fn with_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(path) = get(ENV_STORE_PATH) {
        config.store.path = PathBuf::from(path);
    }

    if let Some(path) = get(ENV_ARTIFACT_PATH) {
        config.artifact.path = PathBuf::from(path);
    }

    if let Some(name) = get(ENV_SERVICE_NAME) {
        config.service.name = name;
    }

    if let Some(program) = get(ENV_SERVICE_PROGRAM) {
        config.service.program = program;
    }

    if let Some(secs) = get(ENV_COMMAND_TIMEOUT) {
        config.service.timeout_secs = secs
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::InvalidEnv {
                var: ENV_COMMAND_TIMEOUT,
                value: secs.clone(),
                expected: "a whole number of seconds greater than 0",
            })?;
    }

    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "store",
        "artifact",
        "service",
        "path",
        "name",
        "program",
        "timeout_secs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
