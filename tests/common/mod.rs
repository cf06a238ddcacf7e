//! Shared testing utilities for intelsiem integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory holding a config file and the error log.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory used as the CLI's current directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path of the config file written by [`TestContext::write_config`].
    pub fn config_path(&self) -> PathBuf {
        self.work_dir.join("config/config.yaml")
    }

    /// Path of the error log the written config points at.
    pub fn log_path(&self) -> PathBuf {
        self.root.path().join("logs/error.log")
    }

    /// Write a config with both API keys whose sources point at `alien_vault_url`
    /// and `virus_total_url`.
    pub fn write_config(&self, alien_vault_url: &str, virus_total_url: &str) -> PathBuf {
        let content = format!(
            r#"api_keys:
  alien_vault: "OTX_TEST_KEY"
  virus_total: "VT_TEST_KEY"
sources:
  alien_vault:
    base_url: "{alien_vault_url}"
  virus_total:
    base_url: "{virus_total_url}"
logging:
  path: "{}"
"#,
            self.log_path().display()
        );
        self.write_raw_config(&content)
    }

    /// Write arbitrary config content.
    pub fn write_raw_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("Failed to create config directory");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Contents of the error log, or an empty string when nothing was logged.
    pub fn log_contents(&self) -> String {
        fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Build a command for invoking the compiled `intelsiem` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("intelsiem").expect("Failed to locate intelsiem binary");
        cmd.current_dir(&self.work_dir).env_remove("INTELSIEM_CONFIG");
        cmd
    }
}
