//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test context with an isolated project directory.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: warden_test_utils::temp_dir(),
        }
    }

    /// Write `.warden/config.yaml` in the project directory.
    pub fn with_config(self, yaml: &str) -> Self {
        warden_test_utils::write_file(self.path(), ".warden/config.yaml", yaml);
        self
    }

    /// Get path to the project directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default location of the state file.
    pub fn state_path(&self) -> PathBuf {
        self.path().join(".warden").join("state.json")
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("warden").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("WARDEN_CONFIG")
            .env_remove("WARDEN_DATA_DIR")
            .env_remove("WARDEN_AUDIT")
            .env_remove("WARDEN_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run `warden <args>` and capture the output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("Failed to run warden")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{}'\nstdout: {}",
            text,
            stdout
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{}'\nstderr: {}",
            text,
            stderr
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}\nstderr: {}",
            code,
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }
}

/// JSON output helpers
pub mod json {
    use serde_json::Value;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }
}
