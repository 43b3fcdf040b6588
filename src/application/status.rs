//! Status Use Case
//!
//! Read-only drift check: compares the config.yaml on disk with the document
//! the stored settings (or a candidate model) would generate.
//!
//! Nothing is written and no service command is run.

use std::path::{Path, PathBuf};

use crate::domain::entities::SettingsModel;
use crate::domain::ports::{FileSystem, FsError, SettingsRepository, StoreError};
use crate::domain::services::{generate, ArtifactDocument, DiffResult, Differ};
use crate::domain::value_objects::ContentHash;

/// State of the artifact relative to the expected document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// No file at the artifact path
    Missing,
    /// On-disk content is byte-identical to the expected rendering
    InSync { hash: ContentHash },
    /// On-disk content differs
    Drifted {
        expected: ContentHash,
        actual: ContentHash,
        diff: DiffResult,
        /// Unified diff, on-disk first
        unified: String,
        /// Set when the on-disk file no longer satisfies the daemon's schema
        contract_error: Option<String>,
    },
    /// The file exists but could not be read
    Unreadable { error: FsError },
}

impl ArtifactStatus {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, ArtifactStatus::InSync { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactStatus::Missing => "missing",
            ArtifactStatus::InSync { .. } => "in-sync",
            ArtifactStatus::Drifted { .. } => "drifted",
            ArtifactStatus::Unreadable { .. } => "unreadable",
        }
    }
}

/// Result of a status check
#[derive(Debug, Clone)]
pub struct StatusReport {
    /// The settings the check compared against
    pub settings: SettingsModel,
    /// Set when the store could not be loaded and defaults were used instead
    pub store_error: Option<StoreError>,
    pub artifact_path: PathBuf,
    pub artifact: ArtifactStatus,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.store_error.is_none() && self.artifact.is_in_sync()
    }
}

/// Status use case - compares stored settings with the generated artifact
pub struct StatusUseCase<SR, FS>
where
    SR: SettingsRepository,
    FS: FileSystem,
{
    store: SR,
    file_system: FS,
    artifact_path: PathBuf,
}

impl<SR, FS> StatusUseCase<SR, FS>
where
    SR: SettingsRepository,
    FS: FileSystem,
{
    pub fn new(store: SR, file_system: FS, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            file_system,
            artifact_path: artifact_path.into(),
        }
    }

    /// Compare the artifact with what the stored settings generate
    pub fn execute(&self) -> StatusReport {
        let (settings, store_error) = match self.store.load() {
            Ok(model) => (model, None),
            Err(err) => {
                tracing::warn!(error = %err, "settings store unreadable, comparing against defaults");
                (SettingsModel::default(), Some(err))
            }
        };

        let artifact = self.compare(&settings);
        StatusReport {
            settings,
            store_error,
            artifact_path: self.artifact_path.clone(),
            artifact,
        }
    }

    /// Compare the artifact with what `model` would generate
    pub fn compare(&self, model: &SettingsModel) -> ArtifactStatus {
        let expected = match generate(model).render() {
            Ok(text) => text,
            Err(e) => {
                return ArtifactStatus::Unreadable {
                    error: FsError::Other {
                        path: self.artifact_path.clone(),
                        message: format!("failed to render YAML: {}", e),
                    },
                }
            }
        };
        self.compare_text(&expected)
    }

    fn compare_text(&self, expected: &str) -> ArtifactStatus {
        let path: &Path = &self.artifact_path;
        if !self.file_system.exists(path) {
            return ArtifactStatus::Missing;
        }

        let actual = match self.file_system.read(path) {
            Ok(text) => text,
            Err(FsError::PathNotFound(_)) => return ArtifactStatus::Missing,
            Err(error) => return ArtifactStatus::Unreadable { error },
        };

        if actual == expected {
            return ArtifactStatus::InSync {
                hash: ContentHash::from_content(&actual),
            };
        }

        let differ = Differ::new();
        let label = path.display().to_string();
        ArtifactStatus::Drifted {
            expected: ContentHash::from_content(expected),
            actual: ContentHash::from_content(&actual),
            diff: differ.diff(&actual, expected),
            unified: differ.unified(&actual, expected, &label, "generated"),
            contract_error: ArtifactDocument::parse(&actual)
                .err()
                .map(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FsResult, StoreResult};
    use crate::domain::value_objects::LoggingLevel;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const ARTIFACT: &str = "/smt/config.yaml";

    struct MockStore {
        model: Option<SettingsModel>,
    }

    impl SettingsRepository for MockStore {
        fn load(&self) -> StoreResult<SettingsModel> {
            self.model.clone().ok_or_else(|| StoreError::Corrupted {
                path: PathBuf::from("/conf/smt.toml"),
                message: "expected `=`".to_string(),
            })
        }

        fn persist(&self, _model: &SettingsModel) -> StoreResult<()> {
            Ok(())
        }

        fn location(&self) -> String {
            "/conf/smt.toml".to_string()
        }
    }

    #[derive(Default)]
    struct MockFileSystem {
        files: RefCell<HashMap<PathBuf, String>>,
        unreadable: bool,
    }

    impl MockFileSystem {
        fn with_artifact(content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .borrow_mut()
                .insert(PathBuf::from(ARTIFACT), content.to_string());
            fs
        }
    }

    impl FileSystem for MockFileSystem {
        fn read(&self, path: &Path) -> FsResult<String> {
            if self.unreadable {
                return Err(FsError::PermissionDenied(path.to_path_buf()));
            }
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| FsError::PathNotFound(path.to_path_buf()))
        }

        fn write(&self, path: &Path, content: &str) -> FsResult<()> {
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

    fn stored() -> MockStore {
        MockStore {
            model: Some(SettingsModel::default()),
        }
    }

    fn default_yaml() -> String {
        generate(&SettingsModel::default()).render().unwrap()
    }

    #[test]
    fn missing_artifact() {
        let status = StatusUseCase::new(stored(), MockFileSystem::default(), ARTIFACT).execute();
        assert_eq!(status.artifact, ArtifactStatus::Missing);
        assert!(!status.is_clean());
    }

    #[test]
    fn identical_artifact_is_in_sync() {
        let fs = MockFileSystem::with_artifact(&default_yaml());
        let status = StatusUseCase::new(stored(), fs, ARTIFACT).execute();

        assert!(status.is_clean());
        assert_eq!(
            status.artifact,
            ArtifactStatus::InSync {
                hash: ContentHash::from_content(&default_yaml())
            }
        );
    }

    #[test]
    fn edited_artifact_has_drifted() {
        let edited = default_yaml().replace("level: INFO", "level: DEBUG");
        let fs = MockFileSystem::with_artifact(&edited);

        let status = StatusUseCase::new(stored(), fs, ARTIFACT).execute();

        match status.artifact {
            ArtifactStatus::Drifted {
                diff,
                unified,
                contract_error,
                ..
            } => {
                assert_eq!(diff.summary(), "+1, -1");
                assert!(unified.contains("-  level: DEBUG\n"));
                assert!(unified.contains("+  level: INFO\n"));
                assert!(contract_error.is_none());
            }
            other => panic!("expected drift, got {other:?}"),
        }
    }

    #[test]
    fn schema_breakage_is_flagged() {
        let broken = default_yaml().replace("usage_threshold_hours: 1", "usage_threshold_hours: '1'");
        let fs = MockFileSystem::with_artifact(&broken);

        let status = StatusUseCase::new(stored(), fs, ARTIFACT).execute();

        assert!(matches!(
            status.artifact,
            ArtifactStatus::Drifted {
                contract_error: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn unreadable_artifact() {
        let mut fs = MockFileSystem::with_artifact("x");
        fs.unreadable = true;

        let status = StatusUseCase::new(stored(), fs, ARTIFACT).execute();
        assert_eq!(status.artifact.label(), "unreadable");
    }

    #[test]
    fn corrupted_store_falls_back_to_defaults() {
        let fs = MockFileSystem::with_artifact(&default_yaml());
        let status = StatusUseCase::new(MockStore { model: None }, fs, ARTIFACT).execute();

        assert!(matches!(status.store_error, Some(StoreError::Corrupted { .. })));
        assert!(status.artifact.is_in_sync());
        assert!(!status.is_clean());
    }

    #[test]
    fn compare_against_candidate_model() {
        let fs = MockFileSystem::with_artifact(&default_yaml());
        let use_case = StatusUseCase::new(stored(), fs, ARTIFACT);
        let candidate = SettingsModel {
            logging_level: LoggingLevel::Error,
            ..SettingsModel::default()
        };

        let status = use_case.compare(&candidate);
        assert_eq!(status.label(), "drifted");
    }
}
