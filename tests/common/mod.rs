//! Shared testing utilities for funcpipe CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const CREDENTIAL_VARS: [&str; 4] =
    ["AZURE_DEVOPS_PAT", "AZURE_ACCESS_TOKEN", "AZURE_SUBSCRIPTION_ID", "AZURE_TENANT_ID"];

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("work")).expect("Failed to create test work directory");
        Self { root }
    }

    /// Path to the directory used as the working directory of CLI invocations.
    pub fn work_dir(&self) -> std::path::PathBuf {
        self.root.path().join("work")
    }

    /// Build a command for invoking the compiled `funcpipe` binary with no
    /// credentials inherited from the caller.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("funcpipe").expect("Failed to locate funcpipe binary");
        cmd.current_dir(self.work_dir()).env("HOME", self.root.path()).env_remove("RUST_LOG");
        for var in CREDENTIAL_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Write `.funcpipe.toml` pointing every service host at `base_url`.
    pub fn point_services_at(&self, base_url: &str) {
        let content = format!(
            r#"[workflow]
poll_interval_ms = 0

[devops]
api_url = "{base_url}"
release_url = "{base_url}"
profile_url = "{base_url}"
host_acquisition_url = "{base_url}"
extension_url = "{base_url}"

[azure]
management_url = "{base_url}"
subscription_id = "sub-1"
"#
        );
        self.write_file(".funcpipe.toml", &content);
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.work_dir().join(relative).exists()
    }
}
