use crate::api::HostedService;
use crate::config::{Config, DEFAULT_HOST};
use crate::error::HubError;
use crate::git::{Branch, LocalState};
use crate::repo_url::{
    self, ParsedHostedUrl, RepositoryReference, Shorthand, UrlOptions, hosted_url_host,
    parse_hosted_url, parse_remote_url, parse_shorthand,
};
use std::path::PathBuf;

const NO_USER_MESSAGE: &str =
    "** No GitHub user set. See http://help.github.com/set-your-user-name-email-and-github-token/";

/// Values taken from the process environment rather than git config.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub host_override: Option<String>,
    pub env_user: Option<String>,
    pub tmp_dir: PathBuf,
    pub browser: Option<String>,
    pub shell: Option<String>,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host_override: config.host_override().map(str::to_string),
            env_user: config.github_user().map(str::to_string),
            tmp_dir: config.tmp_dir(),
            browser: config.browser().map(str::to_string),
            shell: config.shell().map(str::to_string),
        }
    }
}

/// Everything a rewrite rule may ask about the world.
pub struct Context<'a> {
    local: &'a dyn LocalState,
    hosted: &'a dyn HostedService,
    settings: Settings,
}

impl<'a> Context<'a> {
    pub fn new(local: &'a dyn LocalState, hosted: &'a dyn HostedService, settings: Settings) -> Self {
        Self {
            local,
            hosted,
            settings,
        }
    }

    pub fn local(&self) -> &dyn LocalState {
        self.local
    }

    pub fn hosted(&self) -> &dyn HostedService {
        self.hosted
    }

    /// `GITHUB_HOST`, then `hub.host`, then the public service.
    pub fn host(&self) -> String {
        self.settings
            .host_override
            .clone()
            .or_else(|| self.local.config_value("hub.host"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn known_hosts(&self) -> Vec<String> {
        repo_url::known_hosts(&self.host())
    }

    pub fn prefers_https(&self) -> bool {
        self.local
            .config_value("hub.protocol")
            .is_some_and(|p| p.eq_ignore_ascii_case("https"))
    }

    pub fn optional_github_user(&self) -> Option<String> {
        self.local
            .config_value("github.user")
            .or_else(|| self.settings.env_user.clone())
    }

    pub fn github_user(&self) -> Result<String, HubError> {
        self.optional_github_user()
            .ok_or_else(|| HubError::Domain(NO_USER_MESSAGE.to_string()))
    }

    pub fn git_url(&self, project: &RepositoryReference, private: bool) -> String {
        project.git_url(UrlOptions::new(private, self.prefers_https()))
    }

    pub fn parse_url(&self, text: &str) -> Option<ParsedHostedUrl> {
        parse_hosted_url(text, &self.known_hosts())
    }

    /// Host of a URL on the configured host or its gist host.
    pub fn hosted_host(&self, text: &str) -> Option<String> {
        hosted_url_host(text, &self.known_hosts())
    }

    /// `token` read as project shorthand, unless it names a local directory.
    pub fn shorthand(&self, token: &str) -> Option<Shorthand> {
        parse_shorthand(token, |path| self.local.is_directory(path))
    }

    /// Project a shorthand stands for. A lone word is a repository owned by
    /// the authenticated user.
    pub fn shorthand_project(&self, shorthand: &Shorthand) -> Result<RepositoryReference, HubError> {
        match shorthand {
            Shorthand::OwnerAndName { owner, name } => {
                self.github_project(Some(name), Some(owner))
            }
            Shorthand::Owner(word) | Shorthand::Name(word) => {
                let user = self.github_user()?;
                self.github_project(Some(word), Some(&user))
            }
        }
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.local.is_directory(path)
    }

    pub fn is_repo(&self) -> bool {
        self.local.is_repo()
    }

    pub fn remotes(&self) -> Vec<String> {
        self.local.remotes()
    }

    pub fn has_remote(&self, name: &str) -> bool {
        self.remotes().iter().any(|r| r == name)
    }

    /// The hosted project a remote points at, if it is one.
    pub fn remote_project(&self, name: &str) -> Option<RepositoryReference> {
        let url = self.local.remote_url(name)?;
        parse_remote_url(&url, &self.known_hosts())
    }

    /// Name of a remote pointing at `project`.
    pub fn remote_for(&self, project: &RepositoryReference) -> Option<String> {
        self.remotes().into_iter().find(|remote| {
            self.remote_project(remote).is_some_and(|p| {
                p.owner.eq_ignore_ascii_case(&project.owner)
                    && p.name.eq_ignore_ascii_case(&project.name)
            })
        })
    }

    /// Project of the first remote (`origin` when present).
    pub fn main_project(&self) -> Option<RepositoryReference> {
        let origin = self.remotes().into_iter().next()?;
        self.remote_project(&origin)
    }

    /// Project the current branch tracks, falling back to the main project.
    pub fn current_project(&self) -> Option<RepositoryReference> {
        self.upstream_project().or_else(|| self.main_project())
    }

    fn upstream_project(&self) -> Option<RepositoryReference> {
        let upstream = self.upstream_branch()?;
        let remote = upstream.remote_name()?;
        self.remote_project(remote)
    }

    /// Name of the main project, or the working directory's name outside a
    /// hosted repository.
    pub fn repo_name(&self) -> Option<String> {
        self.main_project()
            .map(|p| p.name)
            .or_else(|| self.local.working_dir_name())
    }

    pub fn current_branch(&self) -> Option<Branch> {
        self.local.current_branch()
    }

    pub fn upstream_branch(&self) -> Option<Branch> {
        let branch = self.current_branch()?;
        self.local.upstream_of(&branch).filter(Branch::is_remote)
    }

    pub fn default_branch(&self) -> Branch {
        self.local.default_branch()
    }

    /// Resolve a project from user input.
    ///
    /// `owner` or `name` may carry a full `owner/name`. Missing halves
    /// default to the repository name and the authenticated user. The host
    /// follows the main project when there is one.
    pub fn github_project(
        &self,
        name: Option<&str>,
        owner: Option<&str>,
    ) -> Result<RepositoryReference, HubError> {
        let (owner, name) = match (owner.and_then(|o| o.split_once('/')), name) {
            (Some((o, n)), _) => (o.to_string(), n.to_string()),
            (None, Some(n)) if n.contains('/') => {
                let (o, n) = n.split_once('/').unwrap_or((n, ""));
                (o.to_string(), n.to_string())
            }
            (None, name) => {
                let name = match name {
                    Some(n) => n.to_string(),
                    None => self.repo_name().ok_or_else(|| {
                        HubError::Domain("Error: can't determine repository name".to_string())
                    })?,
                };
                let owner = match owner {
                    Some(o) => o.to_string(),
                    None => self.github_user()?,
                };
                (owner, name)
            }
        };

        let host = self
            .main_project()
            .map(|p| p.host)
            .unwrap_or_else(|| self.host());
        Ok(RepositoryReference::new(owner, name, host))
    }

    pub fn tmp_dir(&self) -> &PathBuf {
        &self.settings.tmp_dir
    }

    pub fn browser(&self) -> Option<&str> {
        self.settings.browser.as_deref()
    }

    pub fn shell(&self) -> Option<&str> {
        self.settings.shell.as_deref()
    }
}
