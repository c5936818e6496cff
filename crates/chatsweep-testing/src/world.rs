//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated data and IDE directories
//! - Populating the fake IDE storage
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{ComposerSpec, CursorFixture};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use chatsweep_testing::{ComposerSpec, TestWorld};
///
/// let world = TestWorld::new()
///     .with_project("ws1", "/home/me/app", &[ComposerSpec::new("c1").files(2)]);
///
/// let result = world.run(&["project", "list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    cursor: CursorFixture,
    env_vars: HashMap<String, String>,
    json: bool,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(".chatsweep");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        let cursor =
            CursorFixture::new(base_path.join("Cursor/User")).expect("Failed to create IDE dir");

        Self {
            temp_dir,
            data_dir,
            cursor,
            env_vars: HashMap::new(),
            json: false,
        }
    }

    /// Get the data directory path (.chatsweep).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the fake IDE user directory.
    pub fn cursor_dir(&self) -> &Path {
        self.cursor.user_dir()
    }

    pub fn cursor(&self) -> &CursorFixture {
        &self.cursor
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a single-folder workspace entry holding `composers`.
    pub fn with_project(self, ws_id: &str, project_path: &str, composers: &[ComposerSpec]) -> Self {
        self.cursor
            .add_folder_workspace(ws_id, project_path, composers)
            .expect("Failed to write workspace");
        self
    }

    /// Add a multi-root workspace entry.
    pub fn with_multi_root(
        self,
        ws_id: &str,
        created_ms: i64,
        folders: &[&str],
        composers: &[ComposerSpec],
    ) -> Self {
        self.cursor
            .add_multi_root_workspace(ws_id, created_ms, folders, composers)
            .expect("Failed to write multi-root workspace");
        self
    }

    /// Switch the CLI output to `--format json`.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--cursor-dir")
            .arg(self.cursor_dir())
            .arg("--format")
            .arg(if self.json { "json" } else { "plain" });

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chatsweep")
            .map_err(|e| anyhow::anyhow!("Failed to find chatsweep binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
