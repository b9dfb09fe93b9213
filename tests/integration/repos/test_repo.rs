#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of one `hub` run.
#[derive(Debug)]
pub struct HubOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl HubOutput {
    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Non-empty stdout lines.
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A throwaway git repository with an isolated `HOME`, so neither global
/// git config nor the caller's `GITHUB_*` settings leak into a test.
pub struct TestRepo {
    _root: TempDir,
    path: PathBuf,
    home: PathBuf,
}

impl TestRepo {
    /// A fresh repository in a directory named `dotfiles`, on branch `main`,
    /// with `github.user` set to `tpw`.
    pub fn new() -> Self {
        let repo = Self::uninitialized("dotfiles");
        repo.git(&["init", "-q"]).unwrap();
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]).unwrap();
        repo.git(&["config", "user.name", "Test User"]).unwrap();
        repo.git(&["config", "user.email", "test@example.com"]).unwrap();
        repo.git(&["config", "github.user", "tpw"]).unwrap();
        repo
    }

    /// A fresh repository whose `origin` points at `owner/name` on GitHub.
    pub fn with_origin(name_with_owner: &str) -> Self {
        let repo = Self::new();
        repo.git(&[
            "remote",
            "add",
            "origin",
            &format!("git://github.com/{}.git", name_with_owner),
        ])
        .unwrap();
        repo
    }

    /// An empty directory that is not a git repository yet.
    pub fn uninitialized(dir_name: &str) -> Self {
        let root = tempfile::tempdir().expect("failed to create temp dir");
        let path = root.path().join(dir_name);
        let home = root.path().join("home");
        std::fs::create_dir_all(&path).expect("failed to create repo dir");
        std::fs::create_dir_all(&home).expect("failed to create home dir");
        Self {
            _root: root,
            path,
            home,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn configure_env(&self, command: &mut Command) {
        command
            .current_dir(&self.path)
            .env("HOME", &self.home)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_PAGER", "cat")
            .env_remove("GITHUB_HOST")
            .env_remove("GITHUB_USER")
            .env_remove("GITHUB_TOKEN")
            .env_remove("GIT")
            .env_remove("BROWSER")
            .env_remove("HUB_LOG")
            .env_remove("HUB_DEBUG");
    }

    /// Plain git, bypassing hub.
    pub fn git(&self, args: &[&str]) -> Result<String, String> {
        let mut command = Command::new("git");
        command.args(args);
        self.configure_env(&mut command);
        let output = command
            .output()
            .unwrap_or_else(|_| panic!("Failed to execute git command: {:?}", args));
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).to_string())
        }
    }

    pub fn hub(&self, args: &[&str]) -> HubOutput {
        self.hub_with_env(args, &[])
    }

    pub fn hub_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> HubOutput {
        let mut command = Command::new(get_binary_path());
        command.args(args);
        self.configure_env(&mut command);
        for (key, value) in envs {
            command.env(key, value);
        }
        let output = command
            .output()
            .unwrap_or_else(|_| panic!("Failed to execute hub command: {:?}", args));
        HubOutput::from_output(output)
    }

    /// Lines `hub --noop ARGS` would run.
    pub fn noop(&self, args: &[&str]) -> Vec<String> {
        let mut full = vec!["--noop"];
        full.extend_from_slice(args);
        let output = self.hub(&full);
        assert!(
            output.success(),
            "hub {:?} failed: {}",
            full,
            output.stderr
        );
        output.lines()
    }
}

pub fn get_binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_hub")
}
