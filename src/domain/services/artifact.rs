//! Artifact Domain Service
//!
//! Derives the YAML document read by the SMT daemon (`smt_plugin.py`) from a
//! [`SettingsModel`] and writes it to disk.
//!
//! The daemon indexes the document as `config['social_media']['usage_threshold_hours']`
//! and so on, and feeds the two numeric fields straight into `timedelta`, so
//! section names, key names and integer typing are a fixed contract.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::SettingsModel;
use crate::domain::ports::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::{ContentHash, LoggingLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpnsenseSection {
    pub unbound_reload_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlocklistSection {
    pub repo_url: String,
    pub local_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialMediaSection {
    pub usage_threshold_hours: u32,
    pub block_duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub level: LoggingLevel,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnboundSection {
    pub log_file: String,
    pub rpz_file: String,
}

/// The daemon's configuration document
///
/// Field order here is the section order in the rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactDocument {
    pub opnsense: OpnsenseSection,
    pub blocklist: BlocklistSection,
    pub social_media: SocialMediaSection,
    pub logging: LoggingSection,
    pub unbound: UnboundSection,
}

impl ArtifactDocument {
    /// Top-level keys the daemon requires, in rendered order
    pub const SECTIONS: [&'static str; 5] =
        ["opnsense", "blocklist", "social_media", "logging", "unbound"];

    /// Render as YAML (block style, two-space nesting)
    ///
    /// The daemon loads the file with a YAML 1.1 parser, so text values that
    /// 1.1 would read as a bool, null, number or date are single-quoted.
    pub fn render(&self) -> Result<String, serde_yaml_ng::Error> {
        let plain = serde_yaml_ng::to_string(self)?;
        let mut rendered = String::with_capacity(plain.len());
        for line in plain.lines() {
            rendered.push_str(&quote_ambiguous_leaf(line));
            rendered.push('\n');
        }
        Ok(rendered)
    }

    /// Read a rendered document back, enforcing the daemon's contract
    pub fn parse(text: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(text)
    }
}

/// Leaf keys whose values are real integers in the document
const INTEGER_KEYS: [&str; 2] = ["usage_threshold_hours", "block_duration_minutes"];

/// Plain scalars YAML 1.1 resolves to a bool or null
const YAML11_KEYWORDS: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "true", "True", "TRUE", "false",
    "False", "FALSE", "on", "On", "ON", "off", "Off", "OFF", "~", "null", "Null", "NULL", "=",
    "<<",
];

/// Single-quote the value of a `  key: value` line when it is a plain scalar
/// a YAML 1.1 loader would not read back as a string
fn quote_ambiguous_leaf(line: &str) -> Cow<'_, str> {
    let Some(rest) = line.strip_prefix("  ") else {
        return Cow::Borrowed(line);
    };
    let Some((key, value)) = rest.split_once(": ") else {
        return Cow::Borrowed(line);
    };
    if key.starts_with(' ') || INTEGER_KEYS.contains(&key) || !is_yaml11_ambiguous(value) {
        return Cow::Borrowed(line);
    }
    Cow::Owned(format!("  {key}: '{}'", value.replace('\'', "''")))
}

fn is_yaml11_ambiguous(value: &str) -> bool {
    YAML11_KEYWORDS.contains(&value) || looks_numeric(value) || looks_like_date(value)
}

/// Ints (binary, octal, hex, `_` separated, sexagesimal), floats, `.inf`
/// and `.nan`. Errs on the side of quoting.
fn looks_numeric(value: &str) -> bool {
    let body = value.strip_prefix(['+', '-']).unwrap_or(value);
    let lower = body.to_ascii_lowercase();
    if matches!(lower.as_str(), ".inf" | ".nan") {
        return true;
    }
    if let Some(hex) = lower.strip_prefix("0x") {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit() || c == '_');
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return !bin.is_empty() && bin.chars().all(|c| matches!(c, '0' | '1' | '_'));
    }
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '_' | ':' | '.' | 'e' | 'E' | '+' | '-'))
}

/// `YYYY-M-D` with anything after it
fn looks_like_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 8
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5].is_ascii_digit()
}

/// Build the daemon document for `model`. Pure and deterministic.
///
/// `enable_service` is not part of the document; it only drives the service
/// reconciler.
pub fn generate(model: &SettingsModel) -> ArtifactDocument {
    ArtifactDocument {
        opnsense: OpnsenseSection {
            unbound_reload_command: model.unbound_reload_command().to_string(),
        },
        blocklist: BlocklistSection {
            repo_url: model.blocklist_repo_url().to_string(),
            local_path: model.blocklist_local_path().to_string(),
        },
        social_media: SocialMediaSection {
            usage_threshold_hours: model.usage_threshold_hours(),
            block_duration_minutes: model.block_duration_minutes(),
        },
        logging: LoggingSection {
            level: model.logging_level(),
            file: model.logging_file().to_string(),
        },
        unbound: UnboundSection {
            log_file: model.unbound_log_file().to_string(),
            rpz_file: model.rpz_file().to_string(),
        },
    }
}

/// Generates and writes the daemon's configuration file
pub struct ArtifactGenerator<FS: FileSystem> {
    file_system: FS,
}

impl<FS: FileSystem> ArtifactGenerator<FS> {
    pub fn new(file_system: FS) -> Self {
        Self { file_system }
    }

    pub fn generate(&self, model: &SettingsModel) -> ArtifactDocument {
        generate(model)
    }

    /// Replace `destination` with the rendered document.
    ///
    /// Returns the hash of the written content. The parent directory must
    /// already exist.
    pub fn write(&self, doc: &ArtifactDocument, destination: &Path) -> FsResult<ContentHash> {
        let content = doc.render().map_err(|e| FsError::Other {
            path: destination.to_path_buf(),
            message: format!("failed to render YAML: {}", e),
        })?;

        self.file_system.write(destination, &content)?;

        let hash = ContentHash::from_content(&content);
        tracing::info!(
            path = %destination.display(),
            hash = hash.short(),
            "artifact written"
        );
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validate;
    use crate::domain::value_objects::{fields, RawSettings};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MockFileSystem {
        files: RefCell<HashMap<PathBuf, String>>,
        fail_with: Option<FsError>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                files: RefCell::new(HashMap::new()),
                fail_with: None,
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn read(&self, path: &Path) -> FsResult<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| FsError::PathNotFound(path.to_path_buf()))
        }

        fn write(&self, path: &Path, content: &str) -> FsResult<()> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
            Ok(())
        }
    }

    fn numeric_string_model() -> SettingsModel {
        let raw = SettingsModel::default()
            .to_raw()
            .with(fields::USAGE_THRESHOLD_HOURS, "12")
            .with(fields::BLOCK_DURATION_MINUTES, "030");
        validate(&raw).unwrap()
    }

    #[test]
    fn default_artifact_snapshot() {
        let doc = generate(&SettingsModel::default());
        let rendered = doc.render().unwrap();

        insta::assert_snapshot!(rendered, @r"
        opnsense:
          unbound_reload_command: service unbound reload
        blocklist:
          repo_url: https://github.com/smt-plugin/blocklist
          local_path: /usr/local/opnsense/scripts/smt/social_media_domains.txt
        social_media:
          usage_threshold_hours: 1
          block_duration_minutes: 60
        logging:
          level: INFO
          file: /var/log/smt/smt.log
        unbound:
          log_file: /var/log/resolver/latest.log
          rpz_file: /var/unbound/rpz/smt.rpz
        ");
    }

    #[test]
    fn yaml11_ambiguous_text_is_quoted() {
        let mut doc = generate(&SettingsModel::default());
        doc.opnsense.unbound_reload_command = "yes".to_string();
        doc.blocklist.repo_url = "on".to_string();
        doc.blocklist.local_path = "NO".to_string();
        doc.logging.file = "12:30".to_string();
        doc.unbound.log_file = "1_000".to_string();
        doc.unbound.rpz_file = "2024-01-01".to_string();

        let rendered = doc.render().unwrap();

        for line in [
            "  unbound_reload_command: 'yes'",
            "  repo_url: 'on'",
            "  local_path: 'NO'",
            "  file: '12:30'",
            "  log_file: '1_000'",
            "  rpz_file: '2024-01-01'",
            "  usage_threshold_hours: 1",
        ] {
            assert!(rendered.contains(&format!("{line}\n")), "{line:?} in\n{rendered}");
        }
        assert_eq!(ArtifactDocument::parse(&rendered).unwrap(), doc);
    }

    #[test]
    fn quoting_targets_only_ambiguous_leaves() {
        assert_eq!(quote_ambiguous_leaf("  file: 0x1F"), "  file: '0x1F'");
        assert_eq!(
            quote_ambiguous_leaf("  unbound_reload_command: service unbound reload"),
            "  unbound_reload_command: service unbound reload"
        );
        assert_eq!(quote_ambiguous_leaf("logging:"), "logging:");
        assert!(!is_yaml11_ambiguous("/var/log/smt/smt.log"));
        assert!(!is_yaml11_ambiguous("INFO"));
        assert!(is_yaml11_ambiguous("-.5"));
        assert!(is_yaml11_ambiguous("~"));
    }

    #[test]
    fn numeric_fields_render_as_integers() {
        let doc = generate(&numeric_string_model());
        let rendered = doc.render().unwrap();

        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&rendered).unwrap();
        let social = &value["social_media"];
        assert_eq!(social["usage_threshold_hours"].as_u64(), Some(12));
        assert_eq!(social["block_duration_minutes"].as_u64(), Some(30));
    }

    #[test]
    fn exactly_five_sections_in_order() {
        let doc = generate(&SettingsModel::default());
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&doc.render().unwrap()).unwrap();

        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, ArtifactDocument::SECTIONS);
    }

    #[test]
    fn enable_service_is_not_part_of_the_artifact() {
        let raw: RawSettings = SettingsModel::default()
            .to_raw()
            .with(fields::ENABLE_SERVICE, "on");
        let enabled = validate(&raw).unwrap();

        let a = generate(&enabled);
        let b = generate(&SettingsModel::default());
        assert_eq!(a, b);
    }

    #[test]
    fn parse_round_trips_rendered_document() {
        let doc = generate(&numeric_string_model());
        let parsed = ArtifactDocument::parse(&doc.render().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn parse_rejects_stringly_typed_numbers() {
        let rendered = generate(&SettingsModel::default())
            .render()
            .unwrap()
            .replace("usage_threshold_hours: 1", "usage_threshold_hours: '1'");
        assert!(ArtifactDocument::parse(&rendered).is_err());
    }

    #[test]
    fn write_stores_rendered_content_and_hash() {
        let fs = MockFileSystem::new();
        let generator = ArtifactGenerator::new(&fs);
        let doc = generate(&SettingsModel::default());
        let dest = Path::new("/smt/config.yaml");

        let hash = generator.write(&doc, dest).unwrap();

        let stored = fs.read(dest).unwrap();
        assert_eq!(stored, doc.render().unwrap());
        assert_eq!(hash, ContentHash::from_content(&stored));
    }

    #[test]
    fn write_surfaces_permission_denied() {
        let mut fs = MockFileSystem::new();
        fs.fail_with = Some(FsError::PermissionDenied(PathBuf::from("/smt/config.yaml")));
        let generator = ArtifactGenerator::new(fs);
        let doc = generate(&SettingsModel::default());

        let err = generator
            .write(&doc, Path::new("/smt/config.yaml"))
            .unwrap_err();
        assert!(matches!(err, FsError::PermissionDenied(_)));
    }
}
