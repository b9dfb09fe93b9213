use crate::error::HubError;
use crate::utils::debug_log;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// A fully qualified ref such as `refs/heads/feature` or
/// `refs/remotes/origin/feature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch(String);

impl Branch {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn local(short_name: &str) -> Self {
        Self(format!("refs/heads/{}", short_name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name without the `refs/heads/` or `refs/remotes/<remote>/` prefix.
    pub fn short_name(&self) -> &str {
        if let Some(rest) = self.0.strip_prefix("refs/heads/") {
            return rest;
        }
        if let Some(rest) = self.0.strip_prefix("refs/remotes/") {
            return rest.split_once('/').map(|(_, b)| b).unwrap_or(rest);
        }
        self.0.strip_prefix("refs/").unwrap_or(&self.0)
    }

    /// Compares short names so `refs/remotes/origin/master` counts as the
    /// default `refs/heads/master`.
    pub fn is_default(&self, default: &Branch) -> bool {
        self.short_name() == default.short_name()
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with("refs/remotes/")
    }

    /// `origin` for `refs/remotes/origin/feature`.
    pub fn remote_name(&self) -> Option<&str> {
        self.0
            .strip_prefix("refs/remotes/")
            .and_then(|rest| rest.split('/').next())
    }
}

/// Read-only view of the local repository and user settings.
///
/// Rewrite rules only ever see this trait. [`GitRepository`] answers the
/// queries by running git; tests substitute an in-memory fake.
pub trait LocalState {
    fn config_value(&self, key: &str) -> Option<String>;
    fn current_branch(&self) -> Option<Branch>;
    fn upstream_of(&self, branch: &Branch) -> Option<Branch>;
    /// The branch `origin/HEAD` points at, `master` when unknown.
    fn default_branch(&self) -> Branch;
    /// Configured remotes, `origin` first.
    fn remotes(&self) -> Vec<String>;
    fn remote_url(&self, name: &str) -> Option<String>;
    /// Members of a `remotes.<name>` group, if one is configured.
    fn remote_group(&self, name: &str) -> Option<String>;
    fn is_repo(&self) -> bool;
    /// Basename of the working directory.
    fn working_dir_name(&self) -> Option<String>;
    fn is_directory(&self, path: &str) -> bool;
    /// Commits reachable from HEAD but not from `upstream`, cherry-equivalent
    /// commits excluded.
    fn unpushed_commits(&self, upstream: &str) -> Vec<String>;
    /// `git log` of the symmetric difference `base...head`.
    fn change_log(&self, base: &str, head: &str) -> Option<String>;
    /// Let the user edit `template` and return the saved text.
    fn edit_message(&self, template: &str) -> Result<String, HubError>;
}

pub fn exec_git(git_cmd: &str, args: &[String]) -> Result<Output, HubError> {
    debug_log(&format!("exec_git: {} {}", git_cmd, args.join(" ")));
    let output = Command::new(git_cmd)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HubError::ToolNotFound(git_cmd.to_string())
            } else {
                HubError::IoError(e)
            }
        })?;

    if !output.status.success() {
        return Err(HubError::GitCliError {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            args: args.to_vec(),
        });
    }
    Ok(output)
}

/// [`LocalState`] backed by the git executable.
///
/// Global options the user passed (`-C`, `-c`, `--git-dir`, ...) are
/// forwarded to every query so answers match what the wrapped command sees.
/// Config lookups and the remote list are cached for the life of the
/// invocation.
pub struct GitRepository {
    git_cmd: String,
    global_args: Vec<String>,
    work_dir: PathBuf,
    editor_fallback: String,
    config_cache: RefCell<HashMap<String, Option<String>>>,
    remotes_cache: RefCell<Option<Vec<String>>>,
}

impl GitRepository {
    pub fn new(git_cmd: &str, global_args: &[String], editor_fallback: &str) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            git_cmd: git_cmd.to_string(),
            global_args: global_args.to_vec(),
            work_dir: resolve_work_dir(&cwd, global_args),
            editor_fallback: editor_fallback.to_string(),
            config_cache: RefCell::new(HashMap::new()),
            remotes_cache: RefCell::new(None),
        }
    }

    pub fn global_args_for_exec(&self) -> Vec<String> {
        self.global_args.clone()
    }

    fn git<S: AsRef<str>>(&self, args: &[S]) -> Result<Output, HubError> {
        let mut full = self.global_args_for_exec();
        full.extend(args.iter().map(|a| a.as_ref().to_string()));
        exec_git(&self.git_cmd, &full)
    }

    /// Trimmed stdout of a git query, `None` on failure or empty output.
    fn git_stdout<S: AsRef<str>>(&self, args: &[S]) -> Option<String> {
        match self.git(args) {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!stdout.is_empty()).then_some(stdout)
            }
            Err(HubError::GitCliError { .. }) => None,
            Err(e) => {
                debug_log(&format!("git query failed: {}", e));
                None
            }
        }
    }

    fn git_dir(&self) -> Option<PathBuf> {
        let dir = self.git_stdout(&["rev-parse", "-q", "--git-dir"])?;
        let dir = PathBuf::from(dir);
        Some(if dir.is_relative() {
            self.work_dir.join(dir)
        } else {
            dir
        })
    }

    fn editor(&self) -> String {
        self.git_stdout(&["var", "GIT_EDITOR"])
            .unwrap_or_else(|| self.editor_fallback.clone())
    }
}

/// Directory git will operate in after applying any `-C` options.
fn resolve_work_dir(cwd: &Path, global_args: &[String]) -> PathBuf {
    let mut dir = cwd.to_path_buf();
    let mut iter = global_args.iter();
    while let Some(arg) = iter.next() {
        let path = if arg == "-C" {
            iter.next().map(String::as_str)
        } else {
            arg.strip_prefix("-C")
        };
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            dir = dir.join(path);
        }
    }
    dir
}

impl LocalState for GitRepository {
    fn config_value(&self, key: &str) -> Option<String> {
        if let Some(cached) = self.config_cache.borrow().get(key) {
            return cached.clone();
        }
        let value = self.git_stdout(&["config", "--get", key]);
        self.config_cache
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        value
    }

    fn current_branch(&self) -> Option<Branch> {
        self.git_stdout(&["symbolic-ref", "-q", "HEAD"])
            .map(Branch::new)
    }

    fn upstream_of(&self, branch: &Branch) -> Option<Branch> {
        let spec = format!("{}@{{upstream}}", branch.short_name());
        self.git_stdout(&["rev-parse", "--symbolic-full-name", spec.as_str()])
            .map(Branch::new)
    }

    fn default_branch(&self) -> Branch {
        self.git_stdout(&["symbolic-ref", "-q", "refs/remotes/origin/HEAD"])
            .map(|full| Branch::local(Branch::new(full).short_name()))
            .unwrap_or_else(|| Branch::local("master"))
    }

    fn remotes(&self) -> Vec<String> {
        if let Some(cached) = self.remotes_cache.borrow().as_ref() {
            return cached.clone();
        }
        let mut list: Vec<String> = self
            .git_stdout(&["remote"])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default();
        if let Some(idx) = list.iter().position(|r| r == "origin") {
            let origin = list.remove(idx);
            list.insert(0, origin);
        }
        *self.remotes_cache.borrow_mut() = Some(list.clone());
        list
    }

    fn remote_url(&self, name: &str) -> Option<String> {
        self.config_value(&format!("remote.{}.url", name))
    }

    fn remote_group(&self, name: &str) -> Option<String> {
        self.config_value(&format!("remotes.{}", name))
    }

    fn is_repo(&self) -> bool {
        self.git(&["rev-parse", "-q", "--git-dir"]).is_ok()
    }

    fn working_dir_name(&self) -> Option<String> {
        let dir = self.work_dir.canonicalize().unwrap_or_else(|_| self.work_dir.clone());
        dir.file_name().map(|n| n.to_string_lossy().to_string())
    }

    fn is_directory(&self, path: &str) -> bool {
        self.work_dir.join(path).is_dir()
    }

    fn unpushed_commits(&self, upstream: &str) -> Vec<String> {
        let range = format!("{}...HEAD", upstream);
        self.git_stdout(&[
            "rev-list",
            "--cherry-pick",
            "--right-only",
            "--no-merges",
            range.as_str(),
        ])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn change_log(&self, base: &str, head: &str) -> Option<String> {
        let range = format!("{}...{}", base, head);
        self.git_stdout(&[
            "log",
            "--no-color",
            "--pretty=medium",
            "--cherry",
            range.as_str(),
        ])
    }

    fn edit_message(&self, template: &str) -> Result<String, HubError> {
        let message_file = self
            .git_dir()
            .ok_or_else(|| HubError::Domain("Error: not a git repository".to_string()))?
            .join("PULLREQ_EDITMSG");
        std::fs::write(&message_file, template)?;

        let editor = self.editor();
        let mut parts = shlex::split(&editor)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| HubError::Domain(format!("can't parse editor command: {}", editor)))?;
        let program = parts.remove(0);
        let is_vim = matches!(
            Path::new(&program).file_name().and_then(|n| n.to_str()),
            Some("vim" | "mvim" | "gvim")
        );

        let mut command = Command::new(&program);
        command.args(&parts);
        if is_vim {
            command.args(["-c", "set ft=gitcommit"]);
        }
        let status = command
            .arg(&message_file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                HubError::Domain(format!(
                    "can't open text editor for pull request message: {}",
                    e
                ))
            })?;
        if !status.success() {
            return Err(HubError::Domain(
                "can't open text editor for pull request message".to_string(),
            ));
        }

        let content = std::fs::read_to_string(&message_file)?;
        if let Err(e) = std::fs::remove_file(&message_file) {
            debug_log(&format!("failed to remove {}: {}", message_file.display(), e));
        }
        Ok(content)
    }
}
