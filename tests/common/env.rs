//! Isolated test environment for running the smt-sync binary.
//!
//! Every `TestEnv` owns a temp directory holding the settings store, the
//! artifact directory and a config file that points the binary at both.
//! The service program defaults to `true` so no real service is touched.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SMT_ENV_VARS: [&str; 5] = [
    "SMT_STORE_PATH",
    "SMT_ARTIFACT_PATH",
    "SMT_SERVICE_NAME",
    "SMT_SERVICE_PROGRAM",
    "SMT_COMMAND_TIMEOUT",
];

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as a single JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

pub struct TestEnv {
    pub root: TempDir,
    config_path: PathBuf,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Environment with the default service program (`true`)
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn store_path(&self) -> PathBuf {
        self.path("store/settings.toml")
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.path("artifact/config.yaml")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn read_artifact(&self) -> String {
        std::fs::read_to_string(self.artifact_path())
            .unwrap_or_else(|e| panic!("failed to read artifact: {e}"))
    }

    pub fn artifact_exists(&self) -> bool {
        self.artifact_path().exists()
    }

    pub fn read_store(&self) -> String {
        std::fs::read_to_string(self.store_path())
            .unwrap_or_else(|e| panic!("failed to read store: {e}"))
    }

    pub fn store_exists(&self) -> bool {
        self.store_path().exists()
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create directories");
        }
        std::fs::write(&path, content).expect("failed to write file");
        path
    }

    pub fn write_artifact(&self, content: &str) {
        std::fs::write(self.artifact_path(), content).expect("failed to write artifact");
    }

    /// Run the CLI against this environment's config
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .stdin(Stdio::null())
            .output()
            .expect("failed to execute smt-sync");
        to_result(output)
    }

    /// Run the CLI with `stdin` piped in
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> TestResult {
        let mut child = self
            .command(args, &[])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn smt-sync");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("failed to write stdin");
        to_result(child.wait_with_output().expect("failed to wait for smt-sync"))
    }

    fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("XDG_CONFIG_HOME", self.path("xdg"))
            .env("RUST_LOG", "warn");
        for var in SMT_ENV_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

pub struct TestEnvBuilder {
    service_program: String,
    timeout_secs: u64,
    create_artifact_dir: bool,
    stored_form: Option<String>,
}

impl TestEnvBuilder {
    fn new() -> Self {
        Self {
            service_program: "true".to_string(),
            timeout_secs: 5,
            create_artifact_dir: true,
            stored_form: None,
        }
    }

    /// Program used in place of `service`
    pub fn with_service_program(mut self, program: &str) -> Self {
        self.service_program = program.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Leave the artifact's parent directory uncreated
    pub fn without_artifact_dir(mut self) -> Self {
        self.create_artifact_dir = false;
        self
    }

    /// Seed the store with raw TOML
    pub fn with_store(mut self, toml: &str) -> Self {
        self.stored_form = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let root = tempfile::tempdir().expect("failed to create temp dir");
        let store_path = root.path().join("store/settings.toml");
        let artifact_path = root.path().join("artifact/config.yaml");

        if self.create_artifact_dir {
            std::fs::create_dir_all(root.path().join("artifact"))
                .expect("failed to create artifact dir");
        }
        if let Some(toml) = &self.stored_form {
            std::fs::create_dir_all(root.path().join("store")).expect("failed to create store dir");
            std::fs::write(&store_path, toml).expect("failed to seed store");
        }

        let config = format!(
            r#"[store]
path = "{store}"

[artifact]
path = "{artifact}"

[service]
name = "smt"
program = "{program}"
timeout_secs = {timeout}
"#,
            store = store_path.display(),
            artifact = artifact_path.display(),
            program = self.service_program,
            timeout = self.timeout_secs,
        );
        let config_path = root.path().join("smt-sync.toml");
        std::fs::write(&config_path, config).expect("failed to write config");

        TestEnv {
            root,
            config_path,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_smt-sync")),
        }
    }
}
