//! In-memory collaborators for rule tests.

use crate::api::{
    CreateOptions, CreatedPullRequest, HostedService, PullRequest, PullRequestHead,
    PullRequestRequest, RepositoryOwner, RepositorySummary,
};
use crate::commands::context::{Context, Settings};
use crate::error::HubError;
use crate::git::{ArgumentList, Branch, LocalState};
use crate::repo_url::RepositoryReference;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct FakeLocal {
    config: HashMap<String, String>,
    remotes: Vec<(String, String)>,
    current_branch: Option<String>,
    upstreams: HashMap<String, String>,
    default_branch: Option<String>,
    not_a_repo: bool,
    dir_name: Option<String>,
    directories: Vec<String>,
    unpushed: Vec<String>,
    edited: Option<String>,
    pub edit_templates: RefCell<Vec<String>>,
}

impl FakeLocal {
    pub fn new() -> Self {
        Self {
            dir_name: Some("dotfiles".to_string()),
            ..Self::default()
        }
    }

    pub fn with_user(self, user: &str) -> Self {
        self.with_config("github.user", user)
    }

    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push((name.to_string(), url.to_string()));
        self
    }

    pub fn with_branch(mut self, short_name: &str) -> Self {
        self.current_branch = Some(short_name.to_string());
        self
    }

    pub fn with_upstream(mut self, short_name: &str, upstream: &str) -> Self {
        self.upstreams
            .insert(short_name.to_string(), upstream.to_string());
        self
    }

    pub fn with_default_branch(mut self, short_name: &str) -> Self {
        self.default_branch = Some(short_name.to_string());
        self
    }

    pub fn outside_repo(mut self) -> Self {
        self.not_a_repo = true;
        self
    }

    pub fn with_dir_name(mut self, name: &str) -> Self {
        self.dir_name = Some(name.to_string());
        self
    }

    pub fn with_directory(mut self, path: &str) -> Self {
        self.directories.push(path.to_string());
        self
    }

    pub fn with_unpushed(mut self, commits: &[&str]) -> Self {
        self.unpushed = commits.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_edited_message(mut self, message: &str) -> Self {
        self.edited = Some(message.to_string());
        self
    }
}

impl LocalState for FakeLocal {
    fn config_value(&self, key: &str) -> Option<String> {
        if let Some(name) = key
            .strip_prefix("remote.")
            .and_then(|rest| rest.strip_suffix(".url"))
        {
            return self.remote_url(name);
        }
        self.config.get(key).cloned()
    }

    fn current_branch(&self) -> Option<Branch> {
        self.current_branch.as_deref().map(Branch::local)
    }

    fn upstream_of(&self, branch: &Branch) -> Option<Branch> {
        self.upstreams.get(branch.short_name()).map(Branch::new)
    }

    fn default_branch(&self) -> Branch {
        Branch::local(self.default_branch.as_deref().unwrap_or("master"))
    }

    fn remotes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.remotes.iter().map(|(n, _)| n.clone()).collect();
        if let Some(idx) = names.iter().position(|n| n == "origin") {
            let origin = names.remove(idx);
            names.insert(0, origin);
        }
        names
    }

    fn remote_url(&self, name: &str) -> Option<String> {
        self.remotes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.clone())
    }

    fn remote_group(&self, name: &str) -> Option<String> {
        self.config.get(&format!("remotes.{}", name)).cloned()
    }

    fn is_repo(&self) -> bool {
        !self.not_a_repo
    }

    fn working_dir_name(&self) -> Option<String> {
        self.dir_name.clone()
    }

    fn is_directory(&self, path: &str) -> bool {
        self.directories.iter().any(|d| d == path)
    }

    fn unpushed_commits(&self, _upstream: &str) -> Vec<String> {
        self.unpushed.clone()
    }

    fn change_log(&self, _base: &str, _head: &str) -> Option<String> {
        None
    }

    fn edit_message(&self, template: &str) -> Result<String, HubError> {
        self.edit_templates.borrow_mut().push(template.to_string());
        self.edited
            .clone()
            .ok_or_else(|| HubError::Domain("can't open text editor".to_string()))
    }
}

#[derive(Default)]
pub struct FakeHosted {
    existing: Vec<String>,
    pull_requests: HashMap<String, PullRequest>,
    pub calls: RefCell<Vec<String>>,
    pub created_pull_requests: RefCell<Vec<PullRequestRequest>>,
    pub created_projects: RefCell<Vec<(String, CreateOptions)>>,
    pub downloads: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeHosted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `owner/name` as existing on the service.
    pub fn with_project(mut self, name_with_owner: &str) -> Self {
        self.existing.push(name_with_owner.to_string());
        self
    }

    pub fn with_pull_request(mut self, id: &str, pull_request: PullRequest) -> Self {
        self.pull_requests.insert(id.to_string(), pull_request);
        self
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl HostedService for FakeHosted {
    fn project_exists(&self, project: &RepositoryReference) -> Result<bool, HubError> {
        self.record(format!("exists {}", project.name_with_owner()));
        Ok(self.existing.contains(&project.name_with_owner()))
    }

    fn fetch_pull_request(
        &self,
        project: &RepositoryReference,
        id: &str,
    ) -> Result<PullRequest, HubError> {
        self.record(format!("pull {}#{}", project.name_with_owner(), id));
        self.pull_requests.get(id).cloned().ok_or(HubError::Http {
            action: Some("fetching pull request".to_string()),
            status: 404,
            message: "Not Found".to_string(),
            errors: Vec::new(),
        })
    }

    fn fork_project(&self, project: &RepositoryReference) -> Result<(), HubError> {
        self.record(format!("fork {}", project.name_with_owner()));
        Ok(())
    }

    fn create_project(
        &self,
        project: &RepositoryReference,
        options: &CreateOptions,
    ) -> Result<(), HubError> {
        self.record(format!("create {}", project.name_with_owner()));
        self.created_projects
            .borrow_mut()
            .push((project.name_with_owner(), options.clone()));
        Ok(())
    }

    fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, HubError> {
        self.record(format!("pull-request {}", request.project.name_with_owner()));
        self.created_pull_requests.borrow_mut().push(request.clone());
        Ok(CreatedPullRequest {
            html_url: format!(
                "https://{}/{}/pull/1",
                request.project.host,
                request.project.name_with_owner()
            ),
        })
    }

    fn download_patch(&self, url: &str, destination: &Path) -> Result<(), HubError> {
        self.record(format!("download {}", url));
        self.downloads
            .borrow_mut()
            .push((url.to_string(), destination.to_path_buf()));
        Ok(())
    }
}

pub fn pull_request(label: &str, head_private: Option<bool>, title: &str) -> PullRequest {
    let (user, branch) = label.split_once(':').unwrap();
    PullRequest {
        number: 73,
        title: title.to_string(),
        html_url: "https://github.com/defunkt/hub/pull/73".to_string(),
        head: PullRequestHead {
            label: label.to_string(),
            branch: branch.to_string(),
            repo: head_private.map(|private| RepositorySummary {
                name: "hub".to_string(),
                owner: RepositoryOwner {
                    login: user.to_string(),
                },
                private,
            }),
        },
    }
}

pub fn settings() -> Settings {
    Settings {
        tmp_dir: PathBuf::from("/tmp"),
        ..Settings::default()
    }
}

/// Run a rule against fakes and return the rewritten list.
pub fn apply(
    rule: crate::commands::rules::Rule,
    tokens: &[&str],
    local: &FakeLocal,
    hosted: &FakeHosted,
) -> Result<ArgumentList, HubError> {
    let ctx = Context::new(local, hosted, settings());
    let mut args = ArgumentList::new(tokens, "git");
    rule(&mut args, &ctx)?;
    Ok(args)
}

/// Like [`apply`] with `--noop` in effect.
pub fn apply_noop(
    rule: crate::commands::rules::Rule,
    tokens: &[&str],
    local: &FakeLocal,
    hosted: &FakeHosted,
) -> Result<ArgumentList, HubError> {
    let ctx = Context::new(local, hosted, settings());
    let mut args = ArgumentList::new(tokens, "git");
    args.set_noop();
    rule(&mut args, &ctx)?;
    Ok(args)
}

/// Shell lines of the full command chain.
pub fn chain(args: &ArgumentList) -> Vec<String> {
    args.commands().iter().map(|c| c.to_shell_line()).collect()
}
